//! In-memory task collection and its mutation operations.
//!
//! The [`Tracker`] loads the collection from a [`Store`] once, when it is
//! constructed, and writes the whole collection back after every mutation.
//! A failed write rolls the in-memory change back, so after any error the
//! tracker still holds what was last persisted.

use crate::error::TrackerError;
use crate::store::Store;
use crate::task::{Status, Task};
use tracing::{info, warn};

pub struct Tracker<S: Store> {
    store: S,
    tasks: Vec<Task>,
    last_id: u32,
}

impl<S: Store> Tracker<S> {
    /// Creates a tracker holding everything currently in `store`.
    ///
    /// # Returns
    ///
    /// * `Result<Tracker<S>, TrackerError>` - The tracker, or the store's load error
    pub fn new(store: S) -> Result<Self, TrackerError> {
        let tasks = store.load()?;
        let last_id = tasks.iter().map(Task::id).max().unwrap_or(0);
        info!("Loaded {} tasks, last ID is {}", tasks.len(), last_id);
        Ok(Self {
            store,
            tasks,
            last_id,
        })
    }

    /// Highest ID assigned so far.
    pub fn last_id(&self) -> u32 {
        self.last_id
    }

    /// Adds a new `todo` task and returns it.
    ///
    /// The task gets the ID following the highest one ever assigned by this tracker,
    /// so IDs of deleted tasks are never handed out again. Once `u32::MAX` has been
    /// assigned, no further task can be added.
    #[tracing::instrument(skip(self))]
    pub fn add_task(&mut self, description: String) -> Result<Task, TrackerError> {
        let new_id = self
            .last_id
            .checked_add(1)
            .ok_or(TrackerError::IdsExhausted)?;
        let task = Task::new(new_id, description);
        self.tasks.push(task.clone());
        if let Err(err) = self.store.save(&self.tasks) {
            warn!("Could not persist new task {}, rolling back", new_id);
            self.tasks.pop();
            return Err(err.into());
        }
        self.last_id = new_id;
        info!("Added task {}", new_id);
        Ok(task)
    }

    /// Replaces the description of the task with the given ID.
    #[tracing::instrument(skip(self))]
    pub fn update_task(&mut self, id: u32, description: String) -> Result<Task, TrackerError> {
        self.modify(id, |task| task.set_description(description))
    }

    /// Removes the task with the given ID and returns it as it was.
    #[tracing::instrument(skip(self))]
    pub fn delete_task(&mut self, id: u32) -> Result<Task, TrackerError> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        if let Err(err) = self.store.save(&self.tasks) {
            warn!("Could not persist deletion of task {}, rolling back", id);
            self.tasks.insert(index, removed);
            return Err(err.into());
        }
        info!("Deleted task {}", id);
        Ok(removed)
    }

    /// Lists tasks in creation order, keeping only those with `status` if one is given.
    pub fn list_tasks(&self, status: Option<Status>) -> Vec<&Task> {
        match status {
            None => self.tasks.iter().collect(),
            Some(status) => self
                .tasks
                .iter()
                .filter(|task| task.status() == status)
                .collect(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn change_status(&mut self, id: u32, status: Status) -> Result<Task, TrackerError> {
        self.modify(id, |task| task.set_status(status))
    }

    pub fn mark_in_progress(&mut self, id: u32) -> Result<Task, TrackerError> {
        self.change_status(id, Status::InProgress)
    }

    pub fn mark_done(&mut self, id: u32) -> Result<Task, TrackerError> {
        self.change_status(id, Status::Done)
    }

    fn position(&self, id: u32) -> Result<usize, TrackerError> {
        self.tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TrackerError::NotFound(id))
    }

    fn modify(&mut self, id: u32, change: impl FnOnce(&mut Task)) -> Result<Task, TrackerError> {
        let index = self.position(id)?;
        let previous = self.tasks[index].clone();
        change(&mut self.tasks[index]);
        if let Err(err) = self.store.save(&self.tasks) {
            warn!("Could not persist change to task {}, rolling back", id);
            self.tasks[index] = previous;
            return Err(err.into());
        }
        info!("Updated task {}", id);
        Ok(self.tasks[index].clone())
    }
}
