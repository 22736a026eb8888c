//! Web UI for the agenda calendar.
//!
//! A small axum app: month calendar at `/`, day detail at `/day/{date}`,
//! add form at `/day/{date}/add`, edit/delete at `/event/{id}`. All state
//! lives in the `agenda-core` event store; mutations follow
//! POST-redirect-GET so every rendered page reads fresh store state.

pub mod routes;
pub mod singleton;
pub mod state;
pub mod views;
