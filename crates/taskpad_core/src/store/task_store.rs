//! Task store: the single source of truth for the task list.
//!
//! # Responsibility
//! - Own the in-memory ordered task list and the transient search query.
//! - Apply create/edit/delete/toggle mutations and re-persist the full
//!   list after each one.
//! - Derive the filtered list view for display.
//!
//! # Invariants
//! - Task keys are unique within the list, enforced at creation time.
//! - Every mutation persists the post-mutation list, never a stale copy.
//! - Storage failures never propagate: the in-memory list stays
//!   authoritative for the session and the outcome is reported as
//!   `SaveOutcome::MemoryOnly`.
//! - Insertion order is preserved; edit replaces fields in place.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::search::filter::filter_tasks;
use crate::storage::KvStore;
use log::{debug, error, info};
use uuid::Uuid;

/// Fixed blob key the full task list is stored under.
pub const TASKS_KV_KEY: &str = "tasks";

pub type StoreResult<T> = Result<T, TaskStoreError>;

/// Semantic errors for task store mutations.
///
/// Storage failures are deliberately absent: they degrade to
/// [`SaveOutcome::MemoryOnly`] instead of failing the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStoreError {
    /// Title was empty or whitespace-only after trimming.
    EmptyTitle,
    /// No task with the given key exists.
    NotFound(TaskId),
}

impl std::fmt::Display for TaskStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty or whitespace-only"),
            Self::NotFound(key) => write!(f, "task not found: {key}"),
        }
    }
}

impl std::error::Error for TaskStoreError {}

impl From<TaskValidationError> for TaskStoreError {
    fn from(value: TaskValidationError) -> Self {
        match value {
            TaskValidationError::EmptyTitle => Self::EmptyTitle,
        }
    }
}

/// Whether the full-list write behind a mutation reached durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The list was serialized and written to the key-value store.
    Durable,
    /// The write failed; the mutation is applied in memory only.
    MemoryOnly,
}

impl SaveOutcome {
    pub fn is_durable(self) -> bool {
        matches!(self, Self::Durable)
    }
}

/// Result of a successful mutation: the affected key and the save outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub key: TaskId,
    pub save: SaveOutcome,
}

/// In-memory task list bound to a key-value persistence collaborator.
pub struct TaskStore<S: KvStore> {
    kv: S,
    tasks: Vec<Task>,
    query: String,
}

impl<S: KvStore> TaskStore<S> {
    /// Creates an empty store over the given persistence collaborator.
    ///
    /// Call [`TaskStore::load`] before the first read to pick up any
    /// previously persisted list.
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            tasks: Vec::new(),
            query: String::new(),
        }
    }

    /// Loads the persisted task list, replacing the in-memory list.
    ///
    /// A missing blob, a read failure, and a decode failure all yield an
    /// empty list; failures are logged and never propagate. There is no
    /// partial recovery of a corrupt blob.
    pub fn load(&mut self) {
        self.tasks = match self.kv.get(TASKS_KV_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Task>>(&blob) {
                Ok(tasks) => {
                    info!(
                        "event=task_load module=store status=ok count={}",
                        tasks.len()
                    );
                    tasks
                }
                Err(err) => {
                    error!(
                        "event=task_load module=store status=error error_code=decode_failed error={err}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("event=task_load module=store status=ok count=0 blob=absent");
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=task_load module=store status=error error_code=kv_read_failed error={err}"
                );
                Vec::new()
            }
        };
    }

    /// Appends a new pending task and persists the full list.
    ///
    /// # Contract
    /// - Rejects `EmptyTitle` without touching the list.
    /// - The generated key is checked against the live list; uniqueness is
    ///   an enforced invariant, not an assumption.
    /// - The new task starts with `completed = false`.
    pub fn create(&mut self, title: &str, details: &str) -> StoreResult<Mutation> {
        let task = Task::with_key(self.fresh_key(), title, details);
        task.validate()?;

        let key = task.key;
        self.tasks.push(task);
        let save = self.persist();
        info!(
            "event=task_create module=store status=ok key={key} count={}",
            self.tasks.len()
        );
        Ok(Mutation { key, save })
    }

    /// Replaces the title and details of an existing task in place.
    ///
    /// # Contract
    /// - `key` and `completed` are preserved.
    /// - Rejects `EmptyTitle` and `NotFound` before mutating.
    /// - Persists the post-edit list.
    pub fn edit(&mut self, key: TaskId, title: &str, details: &str) -> StoreResult<Mutation> {
        if title.trim().is_empty() {
            return Err(TaskStoreError::EmptyTitle);
        }
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.key == key)
            .ok_or(TaskStoreError::NotFound(key))?;

        task.title = title.to_string();
        task.details = details.to_string();
        let save = self.persist();
        info!("event=task_edit module=store status=ok key={key}");
        Ok(Mutation { key, save })
    }

    /// Removes the task with the given key, if present.
    ///
    /// An absent key is a no-op on membership, never an error. The
    /// resulting list is persisted either way.
    pub fn delete(&mut self, key: TaskId) -> Mutation {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.key != key);
        if self.tasks.len() == before {
            debug!("event=task_delete module=store status=noop key={key}");
        } else {
            info!(
                "event=task_delete module=store status=ok key={key} count={}",
                self.tasks.len()
            );
        }
        let save = self.persist();
        Mutation { key, save }
    }

    /// Flips the completion flag on the task with the given key, if present.
    ///
    /// An absent key is a no-op, never an error. The list is persisted
    /// either way.
    pub fn toggle_completion(&mut self, key: TaskId) -> Mutation {
        match self.tasks.iter_mut().find(|task| task.key == key) {
            Some(task) => {
                task.toggle();
                info!(
                    "event=task_toggle module=store status=ok key={key} completed={}",
                    task.completed
                );
            }
            None => debug!("event=task_toggle module=store status=noop key={key}"),
        }
        let save = self.persist();
        Mutation { key, save }
    }

    /// Filters the list by `query` without touching stored state.
    ///
    /// Pure function of (list, query); no persistence side effect.
    pub fn search(&self, query: &str) -> Vec<&Task> {
        filter_tasks(&self.tasks, query)
    }

    /// Updates the transient search query driving [`TaskStore::filtered_view`].
    ///
    /// The query is never persisted.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Returns the current transient search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the view derived from the current query.
    ///
    /// Recomputed on every call, so it always reflects the current list.
    /// With an empty query this is the full list in insertion order.
    pub fn filtered_view(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.query)
    }

    /// Returns the full list in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up one task by key.
    pub fn get(&self, key: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.key == key)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Serializes the full list and writes it under [`TASKS_KV_KEY`].
    ///
    /// Each write is a whole-list overwrite; there is no incremental
    /// persistence, no retry, and no write queue. Failures are logged and
    /// reported as `MemoryOnly`.
    fn persist(&self) -> SaveOutcome {
        let blob = match serde_json::to_string(&self.tasks) {
            Ok(blob) => blob,
            Err(err) => {
                error!(
                    "event=task_save module=store status=error error_code=encode_failed error={err}"
                );
                return SaveOutcome::MemoryOnly;
            }
        };

        match self.kv.set(TASKS_KV_KEY, &blob) {
            Ok(()) => SaveOutcome::Durable,
            Err(err) => {
                error!(
                    "event=task_save module=store status=error error_code=kv_write_failed error={err}"
                );
                SaveOutcome::MemoryOnly
            }
        }
    }

    fn fresh_key(&self) -> TaskId {
        // v4 collisions are vanishingly rare; the check keeps uniqueness an
        // invariant of the list rather than a property of the generator.
        loop {
            let key = Uuid::new_v4();
            if !self.tasks.iter().any(|task| task.key == key) {
                return key;
            }
        }
    }
}
