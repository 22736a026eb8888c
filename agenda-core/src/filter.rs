//! Day-scoped filtering over the event collection.

use chrono::NaiveDate;

use crate::event::Event;

/// The events whose `start` falls on `date`, in collection order.
pub fn events_on(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|e| e.day() == date).collect()
}
