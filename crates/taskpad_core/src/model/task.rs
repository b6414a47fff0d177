//! Task domain model.
//!
//! # Responsibility
//! - Define the single record type the whole application revolves around.
//! - Validate user-entered titles before a mutation is committed.
//!
//! # Invariants
//! - `key` is stable, unique within a list, and never reused.
//! - `completed` starts as `false` and only changes by toggling.
//! - A task accepted by `validate()` has a non-blank title.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Validation failure raised before a create/edit mutation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only after trimming.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty or whitespace-only"),
        }
    }
}

impl Error for TaskValidationError {}

/// A single to-do item.
///
/// Serialized shape matches the external storage schema: the title is
/// stored under the field name `task`, and `completed`/`details` may be
/// absent on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable key used for edit/delete/toggle addressing.
    pub key: TaskId,
    /// User-entered title. Serialized as `task` to match external schema naming.
    #[serde(rename = "task")]
    pub title: String,
    /// Completion flag; `false` at creation, flipped in place by toggling.
    #[serde(default)]
    pub completed: bool,
    /// Free-form details text; empty string means "no details".
    #[serde(default)]
    pub details: String,
}

impl Task {
    /// Creates a new pending task with a generated stable key.
    pub fn new(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self::with_key(Uuid::new_v4(), title, details)
    }

    /// Creates a pending task with a caller-provided stable key.
    ///
    /// Used by the store's creation path, where key uniqueness is checked
    /// against the live list before the key is handed in.
    pub fn with_key(key: TaskId, title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            completed: false,
            details: details.into(),
        }
    }

    /// Rejects blank titles.
    ///
    /// Write paths must call this before committing the record to the list.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Flips the completion flag in place.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Returns whether the task carries any details text.
    pub fn has_details(&self) -> bool {
        !self.details.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskValidationError};

    #[test]
    fn new_task_starts_pending() {
        let task = Task::new("buy milk", "");
        assert!(!task.completed);
        assert!(!task.has_details());
    }

    #[test]
    fn validate_rejects_whitespace_only_title() {
        let task = Task::new("   \t", "details");
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));
    }

    #[test]
    fn validate_accepts_title_with_inner_whitespace() {
        let task = Task::new("  buy milk  ", "");
        assert!(task.validate().is_ok());
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut task = Task::new("walk dog", "");
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
    }
}
