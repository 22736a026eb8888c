//! Event detail: the edit form, update submit, and delete.

use axum::Router;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Form;
use chrono::NaiveDateTime;
use serde::Deserialize;
use uuid::Uuid;

use agenda_core::{Category, EventPatch};

use crate::routes::{self, AppError};
use crate::state::AppState;
use crate::views;

const NOT_FOUND: &str = "Afspraak niet gevonden";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/event/{id}", get(detail_page).post(update_submit))
        .route("/event/{id}/delete", post(delete_submit))
}

/// An id that doesn't parse as a UUID can't name any stored event, so it
/// gets the same terminal page as a vanished one.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(NOT_FOUND))
}

/// GET /event/{id} - the edit form, or the terminal not-found page.
async fn detail_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;

    let store = state.store().lock().await;
    let event = store.get(id).ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    Ok(Html(views::event_page(event)))
}

/// Request body of the edit form. The event keeps its dates; only the
/// clock times are editable here.
#[derive(Deserialize)]
pub struct EditEventForm {
    title: String,
    start_time: String,
    end_time: String,
    #[serde(default)]
    category: Option<String>,
}

/// POST /event/{id} - apply the edit, back to the event's day page.
async fn update_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EditEventForm>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    let start = routes::parse_time(&form.start_time)?;
    let end = routes::parse_time(&form.end_time)?;

    let mut store = state.store().lock().await;
    let event = store.get(id).ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    let (start_date, end_date) = (event.start.date(), event.end.date());

    let patch = EventPatch {
        title: Some(form.title),
        start: Some(NaiveDateTime::new(start_date, start)),
        end: Some(NaiveDateTime::new(end_date, end)),
        category: Some(form.category.as_deref().and_then(Category::parse)),
    };
    store.update(id, patch)?;

    Ok(Redirect::to(&format!("/day/{start_date}")))
}

/// POST /event/{id}/delete - remove the event, back to the calendar.
/// (The form in the UI guards this with a browser confirm dialog.)
async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;

    let mut store = state.store().lock().await;
    if !store.remove(id)? {
        return Err(AppError::not_found(NOT_FOUND));
    }

    Ok(Redirect::to("/"))
}
