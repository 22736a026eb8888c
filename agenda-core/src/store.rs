//! Snapshot-backed event storage.
//!
//! `EventStore` owns the authoritative in-memory collection, in insertion
//! order. Every effective mutation rewrites the snapshot file; reads never
//! touch the disk after `open`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AgendaError, AgendaResult};
use crate::event::{Event, EventDraft, EventPatch};
use crate::filter;

/// Snapshot format revision. Bump on any incompatible change to the
/// serialized `Event` layout, and teach `open` to migrate the old form.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    events: Vec<Event>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    events: &'a [Event],
}

/// The authoritative event collection plus its snapshot file.
pub struct EventStore {
    path: PathBuf,
    events: Vec<Event>,
}

impl EventStore {
    /// Default snapshot location: `<platform data dir>/agenda/events.json`.
    pub fn default_path() -> AgendaResult<PathBuf> {
        let data_dir = dirs::data_dir().ok_or(AgendaError::NoDataDir)?;
        Ok(data_dir.join("agenda").join("events.json"))
    }

    /// Hydrate a store from the snapshot at `path`.
    ///
    /// A missing file yields an empty collection. A present but malformed
    /// snapshot is an error: refusing to start beats silently replacing the
    /// user's data with an empty collection on the next write.
    pub fn open(path: impl Into<PathBuf>) -> AgendaResult<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(EventStore {
                path,
                events: Vec::new(),
            });
        }

        let content = fs::read_to_string(&path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(AgendaError::UnsupportedVersion(snapshot.version));
        }

        Ok(EventStore {
            path,
            events: snapshot.events,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All events, in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: Uuid) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events starting on `date`, in insertion order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        filter::events_on(&self.events, date)
    }

    /// Assign a fresh id, append, persist. Returns the stored event.
    pub fn add(&mut self, draft: EventDraft) -> AgendaResult<Event> {
        let event = Event {
            id: Uuid::new_v4(),
            title: draft.title,
            start: draft.start,
            end: draft.end,
            category: draft.category,
        };

        self.events.push(event.clone());
        self.persist()?;
        Ok(event)
    }

    /// Merge `patch` over the event with `id`, keeping the id and the
    /// event's position. Returns `false` (and writes nothing) when no
    /// event matches.
    pub fn update(&mut self, id: Uuid, patch: EventPatch) -> AgendaResult<bool> {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };

        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(start) = patch.start {
            event.start = start;
        }
        if let Some(end) = patch.end {
            event.end = end;
        }
        if let Some(category) = patch.category {
            event.category = category;
        }

        self.persist()?;
        Ok(true)
    }

    /// Remove the event with `id`. Returns `false` (and writes nothing)
    /// when no event matches.
    pub fn remove(&mut self, id: Uuid) -> AgendaResult<bool> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);

        if self.events.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Write the full collection to the snapshot file.
    ///
    /// Writes a temp file and renames it over the snapshot, so a crash
    /// mid-write never truncates the previous snapshot.
    pub fn persist(&self) -> AgendaResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            events: &self.events,
        };
        let content = serde_json::to_string_pretty(&snapshot)?;

        // Append to the full file name, so a snapshot called events.db
        // still gets its temp file as events.db.tmp right next to it.
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        fs::write(&temp, content)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Category;
    use chrono::{NaiveDateTime, Duration};
    use tempfile::TempDir;

    fn snapshot_path(dir: &TempDir) -> PathBuf {
        dir.path().join("events.json")
    }

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn draft(title: &str, start: NaiveDateTime, category: Option<Category>) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            start,
            end: start + Duration::hours(1),
            category,
        }
    }

    #[test]
    fn test_open_missing_file_yields_empty_collection() {
        let dir = TempDir::new().unwrap();
        let store = EventStore::open(snapshot_path(&dir)).unwrap();
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_add_appends_and_assigns_unique_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = EventStore::open(snapshot_path(&dir)).unwrap();

        let first = store
            .add(draft("Eerste", at(2025, 8, 13, 12), Some(Category::Urgent)))
            .unwrap();
        let second = store
            .add(draft("Tweede", at(2025, 8, 13, 14), None))
            .unwrap();

        assert_eq!(store.events().len(), 2);
        assert_ne!(first.id, second.id);
        assert_eq!(store.events()[0].title, "Eerste");
        assert_eq!(store.events()[1].title, "Tweede");
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let dir = TempDir::new().unwrap();
        let path = snapshot_path(&dir);

        let mut store = EventStore::open(&path).unwrap();
        store
            .add(draft("Test-afspraak", at(2025, 8, 13, 12), Some(Category::Urgent)))
            .unwrap();
        store
            .add(draft("Andere afspraak", at(2025, 8, 15, 18), None))
            .unwrap();
        let original: Vec<Event> = store.events().to_vec();

        let reloaded = EventStore::open(&path).unwrap();
        assert_eq!(reloaded.events(), original.as_slice());
    }

    #[test]
    fn test_update_patches_only_given_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = EventStore::open(snapshot_path(&dir)).unwrap();
        let event = store
            .add(draft("Vergadering", at(2025, 8, 20, 9), Some(Category::Normaal)))
            .unwrap();

        let changed = store
            .update(
                event.id,
                EventPatch {
                    title: Some("Belangrijke vergadering".to_string()),
                    ..EventPatch::default()
                },
            )
            .unwrap();
        assert!(changed);

        let stored = store.get(event.id).unwrap();
        assert_eq!(stored.id, event.id);
        assert_eq!(stored.title, "Belangrijke vergadering");
        assert_eq!(stored.start, event.start);
        assert_eq!(stored.end, event.end);
        assert_eq!(stored.category, Some(Category::Normaal));
    }

    #[test]
    fn test_update_can_clear_the_category() {
        let dir = TempDir::new().unwrap();
        let mut store = EventStore::open(snapshot_path(&dir)).unwrap();
        let event = store
            .add(draft("Vergadering", at(2025, 8, 20, 9), Some(Category::Urgent)))
            .unwrap();

        store
            .update(
                event.id,
                EventPatch {
                    category: Some(None),
                    ..EventPatch::default()
                },
            )
            .unwrap();

        assert_eq!(store.get(event.id).unwrap().category, None);
    }

    #[test]
    fn test_update_unknown_id_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = EventStore::open(snapshot_path(&dir)).unwrap();
        store
            .add(draft("Vergadering", at(2025, 8, 20, 9), None))
            .unwrap();
        let before: Vec<Event> = store.events().to_vec();

        let changed = store
            .update(
                Uuid::new_v4(),
                EventPatch {
                    title: Some("Niks".to_string()),
                    ..EventPatch::default()
                },
            )
            .unwrap();

        assert!(!changed);
        assert_eq!(store.events(), before.as_slice());
    }

    #[test]
    fn test_remove_deletes_exactly_the_matching_event() {
        let dir = TempDir::new().unwrap();
        let mut store = EventStore::open(snapshot_path(&dir)).unwrap();
        let first = store
            .add(draft("Eerste", at(2025, 8, 13, 12), None))
            .unwrap();
        let second = store
            .add(draft("Tweede", at(2025, 8, 13, 14), None))
            .unwrap();

        assert!(store.remove(first.id).unwrap());
        assert_eq!(store.events().len(), 1);
        assert_eq!(store.events()[0].id, second.id);
    }

    #[test]
    fn test_remove_unknown_id_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = EventStore::open(snapshot_path(&dir)).unwrap();
        store
            .add(draft("Eerste", at(2025, 8, 13, 12), None))
            .unwrap();

        assert!(!store.remove(Uuid::new_v4()).unwrap());
        assert_eq!(store.events().len(), 1);
    }

    #[test]
    fn test_mutations_survive_reload() {
        let dir = TempDir::new().unwrap();
        let path = snapshot_path(&dir);

        let mut store = EventStore::open(&path).unwrap();
        let keep = store
            .add(draft("Blijft", at(2025, 8, 13, 12), None))
            .unwrap();
        let gone = store
            .add(draft("Verdwijnt", at(2025, 8, 13, 14), None))
            .unwrap();
        store.remove(gone.id).unwrap();

        let reloaded = EventStore::open(&path).unwrap();
        assert_eq!(reloaded.events().len(), 1);
        assert_eq!(reloaded.events()[0].id, keep.id);
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error_not_an_empty_collection() {
        let dir = TempDir::new().unwrap();
        let path = snapshot_path(&dir);
        fs::write(&path, "{ not json").unwrap();

        let result = EventStore::open(&path);
        assert!(matches!(result, Err(AgendaError::Snapshot(_))));
    }

    #[test]
    fn test_unknown_snapshot_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = snapshot_path(&dir);
        fs::write(&path, r#"{"version": 2, "events": []}"#).unwrap();

        let result = EventStore::open(&path);
        assert!(matches!(result, Err(AgendaError::UnsupportedVersion(2))));
    }

    #[test]
    fn test_persist_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let path = snapshot_path(&dir);

        let mut store = EventStore::open(&path).unwrap();
        store
            .add(draft("Vergadering", at(2025, 8, 20, 9), None))
            .unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("events.json.tmp").exists());
    }

    #[test]
    fn test_persist_keeps_a_non_json_snapshot_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.db");

        let mut store = EventStore::open(&path).unwrap();
        store
            .add(draft("Vergadering", at(2025, 8, 20, 9), None))
            .unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("events.json.tmp").exists());
        assert!(!dir.path().join("events.db.tmp").exists());

        let reloaded = EventStore::open(&path).unwrap();
        assert_eq!(reloaded.events().len(), 1);
    }
}
