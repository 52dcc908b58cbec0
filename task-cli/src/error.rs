use std::path::PathBuf;
use thiserror::Error;

/// Failures of the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The task file could not be created, read or written.
    #[error("cannot access task file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The task file exists but does not hold a valid task list.
    #[error("task file {} is malformed", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Task (ID: {0}) not found")]
    NotFound(u32),
    /// Every task ID up to `u32::MAX` has already been assigned.
    #[error("no task IDs left to assign")]
    IdsExhausted,
    #[error(transparent)]
    Store(#[from] StoreError),
}
