//! SQLite connection wrapper.
//!
//! Every request (CLI invocation, worker thread) owns its own `DbPool`;
//! concurrent writers are serialised by SQLite's write lock, and the wait
//! for that lock is bounded by the busy timeout.

use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

/// Lock wait used when no configuration is available.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(5000);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open (and migrate) the database at `path` with the default lock timeout.
    pub fn new(path: &str) -> AppResult<Self> {
        Self::with_timeout(path, DEFAULT_LOCK_TIMEOUT)
    }

    /// Open (and migrate) the database at `path`, waiting at most
    /// `lock_timeout` for a competing writer before giving up.
    pub fn with_timeout(path: &str, lock_timeout: Duration) -> AppResult<Self> {
        Self::open_migrated(path, lock_timeout).map(|(pool, _)| pool)
    }

    /// Like `with_timeout`, also returning the migrations this open applied
    /// (for `init` and `db --migrate` to report).
    pub fn open_migrated(path: &str, lock_timeout: Duration) -> AppResult<(Self, Vec<String>)> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(lock_timeout)?;
        // WAL: readers see the last committed snapshot while a writer is active
        let _mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        let applied = init_db(&conn)?;
        Ok((Self { conn }, applied))
    }

    /// Private in-memory database, used by tests.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// Run `func` inside a write transaction that holds the database write
    /// lock from its first statement. Commits on `Ok`; on `Err` (or if the
    /// caller unwinds) the transaction is dropped and rolled back.
    pub fn write_tx<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    /// Run `func` inside a read transaction so multi-statement reads share
    /// one snapshot.
    pub fn read_tx<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Deferred)?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
