//! Personal task tracking backed by a single JSON file.
pub mod cli;
pub mod config;
pub mod error;
pub mod store;
pub mod task;
pub mod tracker;

pub use error::{StoreError, TrackerError};
pub use store::{JsonStore, Store};
pub use task::{Status, Task};
pub use tracker::Tracker;
