//! Cross-process lock on the snapshot file.
//!
//! The event store assumes it is the snapshot's only writer. Locking a
//! sidecar file next to the snapshot enforces that across processes, while
//! still allowing separate instances on separate `--data-file`s.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

/// Held for the lifetime of the process; dropping it releases the lock.
pub struct SnapshotLock {
    _file: File,
}

/// Take an exclusive lock on `<data-file>.lock`, failing if another
/// instance already holds it.
pub fn acquire(data_file: &Path) -> Result<SnapshotLock> {
    // Append to the full file name: a snapshot called events.db locks
    // events.db.lock, not events.json.lock.
    let mut lock_name = data_file.as_os_str().to_os_string();
    lock_name.push(".lock");
    let path = PathBuf::from(lock_name);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(&path)
        .with_context(|| format!("Failed to create lock file {}", path.display()))?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another agenda instance is already using {}.\n\
            If that instance is gone, remove {} and try again.",
            data_file.display(),
            path.display()
        )
    })?;

    Ok(SnapshotLock { _file: file })
}
