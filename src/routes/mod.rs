//! Route modules and error-to-response conversion.

pub mod calendar;
pub mod day;
pub mod event;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{NaiveDate, NaiveTime};

use crate::state::AppState;
use crate::views;

/// The full route table: calendar, day detail, add form, event detail.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(calendar::router())
        .merge(day::router())
        .merge(event::router())
}

/// Errors surfaced by route handlers.
#[derive(Debug)]
pub enum AppError {
    /// Terminal "not found" page; no recovery action offered.
    NotFound(String),
    /// A request the form layer should have prevented (e.g. a bad time).
    BadRequest(String),
    /// Anything else becomes a 500.
    Internal(anyhow::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Er ging iets mis: {err}"),
            ),
        };
        (status, Html(views::message_page(&message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::Internal(err.into())
    }
}

/// Parse a `/day/{date}` path segment. Malformed dates get the terminal
/// 404 page; the UI never produces them.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::not_found("Ongeldige datum"))
}

/// Parse a form time value. Browsers send HH:MM, or HH:MM:SS when seconds
/// are set.
pub(crate) fn parse_time(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| AppError::bad_request("Ongeldige tijd"))
}
