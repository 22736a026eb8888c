//! The calendar page: month grid plus the quick-add form.

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::{Form, Router};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use agenda_core::{Category, EventDraft};

use crate::routes::{self, AppError};
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(calendar_page).post(quick_add))
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    /// Month to display as YYYY-MM; defaults to the current month.
    month: Option<String>,
}

/// GET / - the month grid with the quick-add form.
async fn calendar_page(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Html<String>, AppError> {
    let month = query
        .month
        .as_deref()
        .and_then(parse_month)
        .unwrap_or_else(|| first_of_month(Local::now().date_naive()));

    let store = state.store().lock().await;
    Ok(Html(views::calendar_page(month, store.events())))
}

/// Request body of the quick-add form on the calendar page.
#[derive(Deserialize)]
pub struct QuickAddForm {
    title: String,
    date: NaiveDate,
    start_time: String,
    end_time: String,
    #[serde(default)]
    category: Option<String>,
}

/// POST / - create an event from the quick-add form.
async fn quick_add(
    State(state): State<AppState>,
    Form(form): Form<QuickAddForm>,
) -> Result<Redirect, AppError> {
    let start = routes::parse_time(&form.start_time)?;
    let end = routes::parse_time(&form.end_time)?;

    let draft = EventDraft {
        title: form.title,
        start: NaiveDateTime::new(form.date, start),
        end: NaiveDateTime::new(form.date, end),
        category: form.category.as_deref().and_then(Category::parse),
    };

    let mut store = state.store().lock().await;
    store.add(draft)?;

    Ok(Redirect::to("/"))
}

/// Parse a `?month=YYYY-MM` value into the first of that month.
fn parse_month(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
