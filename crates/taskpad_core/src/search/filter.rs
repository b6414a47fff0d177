//! Case-insensitive substring filter over task titles.
//!
//! # Responsibility
//! - Compute the filtered view as a pure function of (list, query).
//!
//! # Invariants
//! - An empty query yields the full list: same members, same order.
//! - Matching is case-insensitive containment on the title only.
//! - Input order is always preserved.

use crate::model::task::Task;

/// Returns the tasks whose title contains `query`, ignoring case.
///
/// The empty query is the identity: every task is returned in list order.
/// Whitespace inside a non-empty query is matched literally.
pub fn filter_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    if query.is_empty() {
        return tasks.iter().collect();
    }
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|task| task.title.to_lowercase().contains(&needle))
        .collect()
}
