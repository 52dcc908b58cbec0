//! Command-line adapter: one tracker operation per command, rendered as text.

use crate::error::TrackerError;
use crate::store::Store;
use crate::task::{Status, Task};
use crate::tracker::Tracker;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "task-cli", about = "A command-line interface for managing tasks.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use a different task file.
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Task description
        description: String,
    },
    /// Update a task description.
    Update {
        /// Task ID
        id: u32,
        /// New task description
        description: String,
    },
    /// Delete a task.
    Delete {
        /// Task ID
        id: u32,
    },
    /// List tasks.
    List {
        /// Only list tasks with this status
        #[arg(value_enum)]
        status: Option<Status>,
    },
    /// Mark a task as in-progress.
    MarkInProgress {
        /// Task ID
        id: u32,
    },
    /// Mark a task as done.
    MarkDone {
        /// Task ID
        id: u32,
    },
}

/// Runs `command` against `tracker`, writing results to `out` and user-facing
/// problems to `err`.
///
/// A missing task is reported on `err` and is not an error. Store failures are
/// returned to the caller.
pub fn run<S: Store>(
    command: Commands,
    tracker: &mut Tracker<S>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Add { description } => {
            let task = tracker.add_task(description)?;
            writeln!(out, "Task added successfully (ID: {}).", task.id())?;
        }
        Commands::Update { id, description } => {
            report(tracker.update_task(id, description), id, "updated", out, err)?;
        }
        Commands::Delete { id } => {
            report(tracker.delete_task(id), id, "deleted", out, err)?;
        }
        Commands::List { status } => {
            let tasks = tracker.list_tasks(status);
            if tasks.is_empty() {
                writeln!(err, "No tasks found.")?;
            }
            for task in tasks {
                write!(out, "{}", task)?;
            }
        }
        Commands::MarkInProgress { id } => {
            let outcome = tracker.mark_in_progress(id);
            report(outcome, id, "marked as in-progress", out, err)?;
        }
        Commands::MarkDone { id } => {
            report(tracker.mark_done(id), id, "marked as done", out, err)?;
        }
    }
    Ok(())
}

fn report(
    outcome: Result<Task, TrackerError>,
    id: u32,
    action: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    match outcome {
        Ok(task) => writeln!(out, "Task (ID: {}) {} successfully.", task.id(), action)?,
        Err(TrackerError::NotFound(_)) => writeln!(err, "Task (ID: {}) not found.", id)?,
        Err(other) => return Err(other.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MockStore;
    use std::path::PathBuf;

    struct Output {
        out: String,
        err: String,
    }

    fn tracker_with(descriptions: &[&str]) -> Tracker<MockStore> {
        let tasks: Vec<Task> = descriptions
            .iter()
            .enumerate()
            .map(|(index, description)| Task::new(index as u32 + 1, description.to_string()))
            .collect();
        let mut store = MockStore::new();
        store.expect_load().returning(move || Ok(tasks.clone()));
        store.expect_save().returning(|_| Ok(()));
        Tracker::new(store).unwrap()
    }

    fn execute(args: &[&str], tracker: &mut Tracker<MockStore>) -> anyhow::Result<Output> {
        let cli = Cli::try_parse_from(std::iter::once("task-cli").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(cli.command, tracker, &mut out, &mut err)?;
        Ok(Output {
            out: String::from_utf8(out)?,
            err: String::from_utf8(err)?,
        })
    }

    #[test]
    fn add_reports_new_id() {
        let mut tracker = tracker_with(&["buy milk"]);

        let output = execute(&["add", "walk dog"], &mut tracker).unwrap();

        assert_eq!(output.out, "Task added successfully (ID: 2).\n");
        assert!(output.err.is_empty());
    }

    #[test]
    fn update_and_status_commands_confirm_success() {
        let mut tracker = tracker_with(&["buy milk"]);

        let updated = execute(&["update", "1", "buy oat milk"], &mut tracker).unwrap();
        let started = execute(&["mark-in-progress", "1"], &mut tracker).unwrap();
        let finished = execute(&["mark-done", "1"], &mut tracker).unwrap();

        assert_eq!(updated.out, "Task (ID: 1) updated successfully.\n");
        assert_eq!(started.out, "Task (ID: 1) marked as in-progress successfully.\n");
        assert_eq!(finished.out, "Task (ID: 1) marked as done successfully.\n");
        assert_eq!(tracker.list_tasks(Some(Status::Done)).len(), 1);
    }

    #[test]
    fn delete_confirms_success() {
        let mut tracker = tracker_with(&["buy milk", "walk dog"]);

        let output = execute(&["delete", "1"], &mut tracker).unwrap();

        assert_eq!(output.out, "Task (ID: 1) deleted successfully.\n");
        assert_eq!(tracker.list_tasks(None).len(), 1);
    }

    #[test]
    fn missing_task_is_reported_not_raised() {
        let mut tracker = tracker_with(&["buy milk"]);

        for args in [
            vec!["update", "42", "nope"],
            vec!["delete", "42"],
            vec!["mark-in-progress", "42"],
            vec!["mark-done", "42"],
        ] {
            let output = execute(&args, &mut tracker).unwrap();

            assert!(output.out.is_empty());
            assert_eq!(output.err, "Task (ID: 42) not found.\n");
        }
    }

    #[test]
    fn list_prints_details_of_matching_tasks() {
        let mut tracker = tracker_with(&["buy milk", "walk dog"]);
        tracker.mark_done(2).unwrap();

        let all = execute(&["list"], &mut tracker).unwrap();
        let done = execute(&["list", "done"], &mut tracker).unwrap();

        assert!(all.out.contains("Description: buy milk"));
        assert!(all.out.contains("Description: walk dog"));
        assert!(!done.out.contains("buy milk"));
        assert!(done.out.contains("Task ID: 2\n"));
        assert!(done.out.contains("Status: done\n"));
    }

    #[test]
    fn list_without_matches_says_so() {
        let mut tracker = tracker_with(&["buy milk"]);

        let output = execute(&["list", "in-progress"], &mut tracker).unwrap();

        assert!(output.out.is_empty());
        assert_eq!(output.err, "No tasks found.\n");
    }

    #[test]
    fn unknown_status_is_rejected_by_the_parser() {
        let result = Cli::try_parse_from(["task-cli", "list", "blocked"]);

        assert!(result.is_err());
    }

    #[test]
    fn file_flag_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["task-cli", "list", "--file", "other.json"]).unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("other.json")));
    }

    #[test]
    fn store_failures_propagate() {
        let mut store = MockStore::new();
        store.expect_load().returning(|| Ok(Vec::new()));
        store.expect_save().returning(|_| {
            Err(StoreError::Io {
                path: PathBuf::from("tasks.json"),
                source: std::io::Error::other("read-only file system"),
            })
        });
        let mut tracker = Tracker::new(store).unwrap();

        let result = execute(&["add", "buy milk"], &mut tracker);

        assert!(result.is_err());
    }
}
