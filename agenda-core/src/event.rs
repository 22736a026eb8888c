//! Appointment types.
//!
//! An `Event` is a single timed appointment. The optional `Category` is a
//! presentation hint only: it picks the display color and has no other
//! behavioral effect.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single calendar appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Assigned once at creation, stable across edits.
    pub id: Uuid,
    pub title: String,
    /// Local wall-clock start, no timezone.
    pub start: NaiveDateTime,
    /// Local wall-clock end. Expected (not enforced) to be >= `start`.
    pub end: NaiveDateTime,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Event {
    /// The calendar day this event belongs to (the date portion of `start`).
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }
}

/// Input for creating a new event. The store assigns the id.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub category: Option<Category>,
}

/// A partial update to an existing event.
///
/// `None` fields keep the current value. `category` nests an extra `Option`
/// so an edit can also clear the category.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub category: Option<Option<Category>>,
}

/// Appointment classification, used only for color coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Urgent,
    Normaal,
    Ontspanning,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Urgent,
        Category::Normaal,
        Category::Ontspanning,
    ];

    /// Stable form value and wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Urgent => "urgent",
            Category::Normaal => "normaal",
            Category::Ontspanning => "ontspanning",
        }
    }

    /// Label shown in form selects.
    pub fn label(self) -> &'static str {
        match self {
            Category::Urgent => "🚨 Urgent",
            Category::Normaal => "📅 Normaal",
            Category::Ontspanning => "🌴 Ontspanning",
        }
    }

    /// Display color in the calendar grid and day list.
    pub fn color(self) -> &'static str {
        match self {
            Category::Urgent => "#ff4d4d",
            Category::Normaal => "#2196f3",
            Category::Ontspanning => "#4caf50",
        }
    }

    /// Parse a form value. Anything unrecognized (including the empty
    /// "no category" choice) maps to `None`.
    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}
