use crate::errors::{AppError, AppResult};
use crate::models::time_entry::TimeEntry;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<TimeEntry> {
    let date_str: String = row.get("date")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(TimeEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date,
        hours: row.get("hours")?,
        minutes: row.get("minutes")?,
        work_order_id: row.get("work_order_id")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a new entry and return its id.
pub fn insert_entry(conn: &Connection, e: &TimeEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO hours_worked (user_id, date, hours, minutes, work_order_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            e.user_id,
            e.date_str(),
            e.hours,
            e.minutes,
            e.work_order_id,
            e.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update all fields except id, user_id and created_at.
pub fn update_entry(conn: &Connection, e: &TimeEntry) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE hours_worked
         SET date = ?1, hours = ?2, minutes = ?3, work_order_id = ?4
         WHERE id = ?5",
        params![e.date_str(), e.hours, e.minutes, e.work_order_id, e.id],
    )?;
    Ok(changed)
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM hours_worked WHERE id = ?1", [id])?)
}

pub fn load_entry(conn: &Connection, id: i64) -> AppResult<Option<TimeEntry>> {
    let entry = conn
        .prepare_cached("SELECT * FROM hours_worked WHERE id = ?1")?
        .query_row([id], map_row)
        .optional()?;
    Ok(entry)
}

pub fn list_entries(conn: &Connection) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM hours_worked ORDER BY date ASC, id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries dated within `[start, end]` (inclusive).
pub fn entries_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM hours_worked
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        [
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// (hours, minutes) of every entry logged against a work order.
pub fn durations_for_work_order(conn: &Connection, work_order_id: i64) -> AppResult<Vec<(u32, u32)>> {
    let mut stmt =
        conn.prepare_cached("SELECT hours, minutes FROM hours_worked WHERE work_order_id = ?1")?;
    let rows = stmt.query_map([work_order_id], |row| {
        Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
