use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Prepare a freshly opened connection: connection-level pragmas, then
/// every pending schema migration. Safe to call on each open; returns the
/// migrations applied by this call.
pub fn init_db(conn: &Connection) -> AppResult<Vec<String>> {
    conn.pragma_update(None, "foreign_keys", "ON")?;

    // Schema lives in the migration engine only.
    run_pending_migrations(conn)
}
