//! Key-value persistence boundary.
//!
//! # Responsibility
//! - Define the storage contract the task store persists through.
//! - Keep SQLite bootstrap and schema details inside this module.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Application data is never read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod migrations;

pub use kv::{open_store, open_store_in_memory, SqliteKvStore};

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence-layer error for open, read, and write failures.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Opaque string-blob storage the application persists through.
///
/// Models the on-device key-value facility: one value per key, whole-value
/// reads and writes, no partial updates.
pub trait KvStore {
    /// Reads the value stored under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
