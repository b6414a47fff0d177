//! Detail projection of a single task.
//!
//! # Responsibility
//! - Render an immutable snapshot of one task record for the detail screen.
//!
//! # Invariants
//! - Projection is pure: no fetch, no subscription, no side effects.
//! - Absent details fall back to a fixed label.

use crate::model::task::Task;

/// Label shown when a task has no details text.
pub const NO_DETAILS_LABEL: &str = "No details available";

/// Two-valued completion labels.
pub const STATUS_COMPLETED: &str = "Completed";
pub const STATUS_PENDING: &str = "Pending";

/// Immutable snapshot of one task, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailView {
    pub title: String,
    pub details: String,
    pub status: &'static str,
}

impl TaskDetailView {
    /// Projects a task into its display shape.
    pub fn project(task: &Task) -> Self {
        let details = if task.has_details() {
            task.details.clone()
        } else {
            NO_DETAILS_LABEL.to_string()
        };
        let status = if task.completed {
            STATUS_COMPLETED
        } else {
            STATUS_PENDING
        };
        Self {
            title: task.title.clone(),
            details,
            status,
        }
    }
}
