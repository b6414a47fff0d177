//! Core domain logic for Taskpad.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod search;
pub mod storage;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use search::filter::filter_tasks;
pub use storage::{
    open_store, open_store_in_memory, KvStore, SqliteKvStore, StorageError, StorageResult,
};
pub use store::task_store::{
    Mutation, SaveOutcome, StoreResult, TaskStore, TaskStoreError, TASKS_KV_KEY,
};
pub use view::detail::TaskDetailView;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
