use std::sync::Arc;

use agenda_core::EventStore;
use tokio::sync::Mutex;

/// Shared application state: the event store behind a lock.
///
/// The store is the snapshot's single writer; handlers hold the lock for
/// the duration of one request, which also serializes the snapshot writes.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<EventStore>>,
}

impl AppState {
    pub fn new(store: EventStore) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn store(&self) -> &Mutex<EventStore> {
        &self.store
    }
}
