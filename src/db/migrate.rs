use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};

/// One schema step. `version` is recorded in the `log` table once applied.
struct Migration {
    version: &'static str,
    message: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250101_0001_create_monthly_allocations",
        message: "Created monthly_allocations table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS monthly_allocations (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            year            INTEGER NOT NULL CHECK(year >= 1),
            month           INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
            available_hours REAL    NOT NULL CHECK(available_hours >= 0),
            UNIQUE(year, month)
        );
        "#,
    },
    Migration {
        version: "20250101_0002_create_hours_worked",
        message: "Created hours_worked table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS hours_worked (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id       INTEGER NOT NULL,
            date          TEXT    NOT NULL,
            hours         INTEGER NOT NULL CHECK(hours BETWEEN 0 AND 24),
            minutes       INTEGER NOT NULL CHECK(minutes BETWEEN 0 AND 59),
            work_order_id INTEGER NOT NULL,
            created_at    TEXT    NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_hours_worked_date ON hours_worked(date);
        "#,
    },
    Migration {
        version: "20250301_0003_allocations_updated_at",
        message: "Added updated_at to monthly_allocations",
        sql: r#"
        ALTER TABLE monthly_allocations ADD COLUMN updated_at TEXT NOT NULL DEFAULT '';
        "#,
    },
    Migration {
        version: "20250301_0004_index_hours_worked_work_order",
        message: "Indexed hours_worked by work order",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_hours_worked_work_order ON hours_worked(work_order_id);
        "#,
    },
];

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Ensure that the `log` table exists. It doubles as the migration registry.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    if table_exists(conn, "log")? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Apply one migration and mark it, atomically. Returns false when another
/// connection applied it first.
fn apply(conn: &Connection, m: &Migration) -> AppResult<bool> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    // another process may have won the race since the first check
    if is_applied(&tx, m.version)? {
        return Ok(false);
    }

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.message],
    )?;

    tx.commit()?;
    Ok(true)
}

/// Versions not yet recorded as applied, in order.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    if !table_exists(conn, "log")? {
        return Ok(MIGRATIONS.iter().map(|m| m.version).collect());
    }

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `db::initialize::init_db()` on every open. Prints nothing;
/// returns `"version → message"` for each migration applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? && apply(conn, m)? {
            applied.push(format!("{} → {}", m.version, m.message));
        }
    }

    Ok(applied)
}
