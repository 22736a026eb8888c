//! Core types for the agenda calendar.
//!
//! This crate owns everything below the web layer:
//! - `Event` and related types for calendar appointments
//! - `EventStore`, the authoritative in-memory collection with JSON
//!   snapshot persistence
//! - the day filter used by the calendar and day views

pub mod error;
pub mod event;
pub mod filter;
pub mod store;

pub use error::{AgendaError, AgendaResult};
pub use event::{Category, Event, EventDraft, EventPatch};
pub use store::EventStore;
