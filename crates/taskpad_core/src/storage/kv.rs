//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Open file or in-memory stores and configure the connection.
//! - Trigger schema migrations before returning a usable store.
//! - Implement whole-value `get`/`set` over the `kv_entries` table.
//!
//! # Invariants
//! - Returned stores have migrations fully applied.
//! - `set` replaces the previous value for the key atomically.

use super::migrations::apply_migrations;
use super::{KvStore, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Key-value store persisted in a single SQLite table.
pub struct SqliteKvStore {
    conn: Connection,
}

/// Opens a store database file and applies all pending migrations.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `kv_open` logging events with duration and status.
pub fn open_store(path: impl AsRef<Path>) -> StorageResult<SqliteKvStore> {
    let started_at = Instant::now();
    info!("event=kv_open module=storage status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=kv_open module=storage status=error mode=file duration_ms={} error_code=open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, "file", started_at)
}

/// Opens an in-memory store and applies all pending migrations.
///
/// Used by tests and throwaway sessions; contents vanish on drop.
pub fn open_store_in_memory() -> StorageResult<SqliteKvStore> {
    let started_at = Instant::now();
    info!("event=kv_open module=storage status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=kv_open module=storage status=error mode=memory duration_ms={} error_code=open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, "memory", started_at)
}

fn finish_open(
    mut conn: Connection,
    mode: &'static str,
    started_at: Instant,
) -> StorageResult<SqliteKvStore> {
    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=kv_open module=storage status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(SqliteKvStore { conn })
        }
        Err(err) => {
            error!(
                "event=kv_open module=storage status=error mode={} duration_ms={} error_code=bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
