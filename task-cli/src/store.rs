//! Persistence of the task collection.
//!
//! The whole collection is always read and written as one unit. There is no
//! partial or append-only persistence: every `save` replaces the file.

use crate::error::StoreError;
use crate::task::Task;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A backend that can hold the full task collection.
#[cfg_attr(test, mockall::automock)]
pub trait Store {
    /// Creates an empty backing file if there is none yet.
    fn ensure_exists(&self) -> Result<(), StoreError>;

    /// Replaces the stored collection with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;

    /// Reads back the stored collection, in stored order.
    fn load(&self) -> Result<Vec<Task>, StoreError>;
}

/// Stores tasks as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the store and makes sure its backing file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        store.ensure_exists()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Store for JsonStore {
    fn ensure_exists(&self) -> Result<(), StoreError> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                debug!("Created task file {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_vec(tasks)
            .map_err(std::io::Error::from)
            .map_err(|err| self.io_error(err))?;
        fs::write(&self.path, json).map_err(|err| self.io_error(err))?;
        debug!("Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|err| self.io_error(err))?;
        if contents.is_empty() {
            debug!("Task file {} is empty", self.path.display());
            return Ok(Vec::new());
        }
        let tasks: Vec<Task> =
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!("Loaded {} tasks from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }
}
