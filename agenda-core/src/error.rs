//! Error types for the agenda crates.

use thiserror::Error;

use crate::store::SNAPSHOT_VERSION;

/// Errors that can occur in store operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Unsupported snapshot version {0} (this build reads version {SNAPSHOT_VERSION})")]
    UnsupportedVersion(u32),

    #[error("Could not determine a data directory for this platform")]
    NoDataDir,
}

/// Result type alias for store operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
