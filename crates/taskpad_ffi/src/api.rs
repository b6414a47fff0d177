//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level task operations to Dart via FRB.
//! - Keep error semantics simple for the UI: envelopes, never panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every mutation envelope reports whether the write reached storage.

use std::path::PathBuf;
use std::sync::OnceLock;
use taskpad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_store,
    ping as ping_inner, SqliteKvStore, Task, TaskDetailView, TaskId, TaskStore,
};
use uuid::Uuid;

const STORE_DB_FILE_NAME: &str = "taskpad_store.sqlite3";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One task as shown in the list screen.
///
/// Carries every field, so the Dart side can pass the whole item to the
/// detail screen as a navigation parameter object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task key in string form.
    pub key: String,
    /// User-entered title.
    pub title: String,
    /// Free-form details text; empty when none.
    pub details: String,
    /// Completion flag.
    pub completed: bool,
}

/// List/search response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Tasks in list order (full list or filtered view).
    pub items: Vec<TaskItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation was applied in memory.
    pub ok: bool,
    /// Affected task key on success.
    pub key: Option<String>,
    /// Whether the full-list write reached durable storage. A `false`
    /// value with `ok == true` means the change may not survive restart.
    pub durable: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn applied(message: impl Into<String>, mutation: taskpad_core::Mutation) -> Self {
        Self {
            ok: true,
            key: Some(mutation.key.to_string()),
            durable: mutation.save.is_durable(),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            key: None,
            durable: false,
            message: message.into(),
        }
    }
}

/// Detail screen response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailsResponse {
    /// Whether the task was found.
    pub ok: bool,
    /// Task title; empty on failure.
    pub title: String,
    /// Details text, or the fixed fallback label when the task has none.
    pub details: String,
    /// Two-valued status label (`Completed` / `Pending`); empty on failure.
    pub status: String,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Returns the full task list in insertion order.
///
/// # FFI contract
/// - Sync call, store-backed execution.
/// - Never panics; open/load failures yield an empty list with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> TaskListResponse {
    list_with_query(String::new(), "task_list")
}

/// Returns the filtered view for a search query.
///
/// An empty query returns the full list unchanged.
///
/// # FFI contract
/// - Sync call, store-backed execution; no persistence side effect.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_search(query: String) -> TaskListResponse {
    list_with_query(query, "task_search")
}

/// Creates a task from the list screen input fields.
///
/// # FFI contract
/// - Sync call, store-backed execution.
/// - Blank titles are rejected without mutating the list.
/// - Never panics; returns the created key and durability on success.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String, details: String) -> TaskActionResponse {
    match with_task_store(|store| store.create(title.trim(), details.trim())) {
        Ok(Ok(mutation)) => TaskActionResponse::applied("Task created.", mutation),
        Ok(Err(err)) => TaskActionResponse::failure(format!("task_add rejected: {err}")),
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Replaces the title and details of an existing task.
///
/// # FFI contract
/// - Sync call, store-backed execution.
/// - Key and completion flag are preserved.
/// - Never panics; unknown keys and blank titles are rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(key: String, title: String, details: String) -> TaskActionResponse {
    let key = match parse_key(&key) {
        Ok(key) => key,
        Err(err) => return TaskActionResponse::failure(format!("task_edit rejected: {err}")),
    };
    match with_task_store(|store| store.edit(key, title.trim(), details.trim())) {
        Ok(Ok(mutation)) => TaskActionResponse::applied("Task updated.", mutation),
        Ok(Err(err)) => TaskActionResponse::failure(format!("task_edit rejected: {err}")),
        Err(err) => TaskActionResponse::failure(format!("task_edit failed: {err}")),
    }
}

/// Deletes a task by key. An absent key is reported as applied.
///
/// # FFI contract
/// - Sync call, store-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(key: String) -> TaskActionResponse {
    let key = match parse_key(&key) {
        Ok(key) => key,
        Err(err) => return TaskActionResponse::failure(format!("task_delete rejected: {err}")),
    };
    match with_task_store(|store| store.delete(key)) {
        Ok(mutation) => TaskActionResponse::applied("Task deleted.", mutation),
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Flips the completion flag of a task by key.
///
/// # FFI contract
/// - Sync call, store-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(key: String) -> TaskActionResponse {
    let key = match parse_key(&key) {
        Ok(key) => key,
        Err(err) => return TaskActionResponse::failure(format!("task_toggle rejected: {err}")),
    };
    match with_task_store(|store| store.toggle_completion(key)) {
        Ok(mutation) => TaskActionResponse::applied("Task toggled.", mutation),
        Err(err) => TaskActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// Returns the detail projection of one task.
///
/// # FFI contract
/// - Sync call, store-backed execution; read-only.
/// - Absent details fall back to a fixed label; status is two-valued.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_details(key: String) -> TaskDetailsResponse {
    let parsed = match parse_key(&key) {
        Ok(parsed) => parsed,
        Err(err) => {
            return TaskDetailsResponse {
                ok: false,
                title: String::new(),
                details: String::new(),
                status: String::new(),
                message: format!("task_details rejected: {err}"),
            }
        }
    };

    match with_task_store(|store| store.get(parsed).map(TaskDetailView::project)) {
        Ok(Some(view)) => TaskDetailsResponse {
            ok: true,
            title: view.title,
            details: view.details,
            status: view.status.to_string(),
            message: String::new(),
        },
        Ok(None) => TaskDetailsResponse {
            ok: false,
            title: String::new(),
            details: String::new(),
            status: String::new(),
            message: format!("task_details failed: task not found: {parsed}"),
        },
        Err(err) => TaskDetailsResponse {
            ok: false,
            title: String::new(),
            details: String::new(),
            status: String::new(),
            message: format!("task_details failed: {err}"),
        },
    }
}

fn list_with_query(query: String, op: &str) -> TaskListResponse {
    match with_task_store(|store| {
        store
            .search(query.as_str())
            .into_iter()
            .map(to_task_item)
            .collect::<Vec<_>>()
    }) {
        Ok(items) => {
            let message = if items.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("{} task(s).", items.len())
            };
            TaskListResponse { items, message }
        }
        Err(err) => TaskListResponse {
            items: Vec::new(),
            message: format!("{op} failed: {err}"),
        },
    }
}

fn with_task_store<T>(f: impl FnOnce(&mut TaskStore<SqliteKvStore>) -> T) -> Result<T, String> {
    let kv =
        open_store(resolve_store_db_path()).map_err(|err| format!("store open failed: {err}"))?;
    let mut store = TaskStore::new(kv);
    store.load();
    Ok(f(&mut store))
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TASKPAD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn parse_key(raw: &str) -> Result<TaskId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid task key `{raw}`"))
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        key: task.key.to_string(),
        title: task.title.clone(),
        details: task.details.clone(),
        completed: task.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, task_add, task_delete, task_details, task_edit,
        task_search, task_toggle,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        format!("{prefix}-{}-{nanos}", std::process::id())
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn task_add_rejects_blank_title() {
        let response = task_add("   ".to_string(), "details".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("rejected"));
    }

    #[test]
    fn mutations_reject_malformed_keys() {
        assert!(!task_edit("not-a-key".into(), "t".into(), "".into()).ok);
        assert!(!task_delete("not-a-key".into()).ok);
        assert!(!task_toggle("not-a-key".into()).ok);
        assert!(!task_details("not-a-key".into()).ok);
    }

    // One flow in one test: the FFI store is process-global, so parallel
    // mutation tests would race on the shared blob.
    #[test]
    fn add_search_toggle_details_delete_flow() {
        let token = unique_token("ffi-flow");

        let added = task_add(format!("errand {token}"), String::new());
        assert!(added.ok, "{}", added.message);
        assert!(added.durable, "{}", added.message);
        let key = added.key.clone().expect("created task should return key");

        let found = task_search(token.clone());
        assert!(found.items.iter().any(|item| item.key == key));

        let toggled = task_toggle(key.clone());
        assert!(toggled.ok, "{}", toggled.message);

        let details = task_details(key.clone());
        assert!(details.ok, "{}", details.message);
        assert_eq!(details.status, "Completed");
        assert_eq!(details.details, "No details available");

        let edited = task_edit(key.clone(), format!("errand {token} v2"), "notes".to_string());
        assert!(edited.ok, "{}", edited.message);
        let details = task_details(key.clone());
        assert_eq!(details.title, format!("errand {token} v2"));
        assert_eq!(details.details, "notes");

        let deleted = task_delete(key.clone());
        assert!(deleted.ok, "{}", deleted.message);
        let gone = task_details(key);
        assert!(!gone.ok);
    }
}
