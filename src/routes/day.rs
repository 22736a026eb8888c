//! Day detail page and the per-day add-event form.

use axum::Router;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::Form;
use chrono::NaiveDateTime;
use serde::Deserialize;

use agenda_core::{Category, EventDraft};

use crate::routes::{self, AppError};
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/day/{date}", get(day_page))
        .route("/day/{date}/add", get(add_page).post(add_submit))
}

/// GET /day/{date} - the day's events, in collection order.
async fn day_page(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Html<String>, AppError> {
    let date = routes::parse_date(&date)?;

    let store = state.store().lock().await;
    Ok(Html(views::day_page(date, &store.events_on(date))))
}

/// GET /day/{date}/add - the add-event form for that day.
async fn add_page(Path(date): Path<String>) -> Result<Html<String>, AppError> {
    let date = routes::parse_date(&date)?;
    Ok(Html(views::add_page(date)))
}

/// Request body of the add-event form. The date comes from the path.
#[derive(Deserialize)]
pub struct AddEventForm {
    title: String,
    start_time: String,
    end_time: String,
    #[serde(default)]
    category: Option<String>,
}

/// POST /day/{date}/add - create the event, back to the day page.
async fn add_submit(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Form(form): Form<AddEventForm>,
) -> Result<Redirect, AppError> {
    let date = routes::parse_date(&date)?;
    let start = routes::parse_time(&form.start_time)?;
    let end = routes::parse_time(&form.end_time)?;

    let draft = EventDraft {
        title: form.title,
        start: NaiveDateTime::new(date, start),
        end: NaiveDateTime::new(date, end),
        category: form.category.as_deref().and_then(Category::parse),
    };

    let mut store = state.store().lock().await;
    store.add(draft)?;

    Ok(Redirect::to(&format!("/day/{date}")))
}
