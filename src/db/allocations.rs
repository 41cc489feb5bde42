//! Durable Period → available-hours map (`monthly_allocations`).
//!
//! The store borrows a `Connection`, which may be a plain connection or an
//! open transaction; atomicity across several calls is the caller's job.

use crate::errors::{AppError, AppResult};
use crate::models::allocation::Allocation;
use crate::models::period::Period;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

pub struct AllocationStore<'c> {
    conn: &'c Connection,
}

impl<'c> AllocationStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Available hours for `period`; 0 when the period was never set.
    pub fn get(&self, period: Period) -> AppResult<f64> {
        let hours: Option<f64> = self
            .conn
            .prepare_cached(
                "SELECT available_hours FROM monthly_allocations
                 WHERE year = ?1 AND month = ?2",
            )?
            .query_row(params![period.year(), period.month()], |row| row.get(0))
            .optional()?;

        Ok(hours.unwrap_or(0.0))
    }

    /// Insert or overwrite the budget of `period`. Idempotent.
    pub fn set(&self, period: Period, hours: f64) -> AppResult<()> {
        validate_available_hours(hours)?;

        self.conn
            .prepare_cached(
                "INSERT INTO monthly_allocations (year, month, available_hours, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(year, month) DO UPDATE SET
                     available_hours = excluded.available_hours,
                     updated_at      = excluded.updated_at",
            )?
            .execute(params![
                period.year(),
                period.month(),
                hours,
                Local::now().to_rfc3339()
            ])?;

        Ok(())
    }

    /// Every stored allocation (ordered by period, though callers must not rely on it).
    pub fn list_all(&self) -> AppResult<Vec<Allocation>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT year, month, available_hours FROM monthly_allocations
             ORDER BY year ASC, month ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i32>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut out = Vec::new();
        for r in rows {
            let (year, month, available_hours) = r?;
            out.push(Allocation {
                period: Period::new(year, month)?,
                available_hours,
            });
        }
        Ok(out)
    }
}

/// A storable balance: finite and not negative.
pub fn validate_available_hours(hours: f64) -> AppResult<()> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(AppError::InvalidAmount(format!(
            "{hours} (available hours must be a finite number >= 0)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    fn p(y: i32, m: u32) -> Period {
        Period::new(y, m).unwrap()
    }

    #[test]
    fn unset_period_reads_zero() {
        let pool = DbPool::in_memory().unwrap();
        let store = AllocationStore::new(&pool.conn);
        assert_eq!(store.get(p(2025, 3)).unwrap(), 0.0);
    }

    #[test]
    fn set_then_get_returns_value() {
        let pool = DbPool::in_memory().unwrap();
        let store = AllocationStore::new(&pool.conn);

        store.set(p(2025, 1), 40.0).unwrap();
        assert_eq!(store.get(p(2025, 1)).unwrap(), 40.0);

        store.set(p(2025, 1), 12.5).unwrap();
        assert_eq!(store.get(p(2025, 1)).unwrap(), 12.5);
    }

    #[test]
    fn set_is_idempotent_and_keeps_one_row() {
        let pool = DbPool::in_memory().unwrap();
        let store = AllocationStore::new(&pool.conn);

        store.set(p(2025, 6), 8.0).unwrap();
        store.set(p(2025, 6), 8.0).unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].period, p(2025, 6));
        assert_eq!(all[0].available_hours, 8.0);
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        let pool = DbPool::in_memory().unwrap();
        let store = AllocationStore::new(&pool.conn);
        store.set(p(2025, 2), 5.0).unwrap();

        for bad in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                store.set(p(2025, 2), bad),
                Err(AppError::InvalidAmount(_))
            ));
        }
        assert_eq!(store.get(p(2025, 2)).unwrap(), 5.0);

        // zero is a valid budget
        store.set(p(2025, 2), 0.0).unwrap();
        assert_eq!(store.get(p(2025, 2)).unwrap(), 0.0);
    }

    #[test]
    fn list_all_covers_every_period() {
        let pool = DbPool::in_memory().unwrap();
        let store = AllocationStore::new(&pool.conn);
        store.set(p(2025, 2), 1.0).unwrap();
        store.set(p(2024, 11), 2.0).unwrap();
        store.set(p(2025, 1), 3.0).unwrap();

        let periods: Vec<Period> = store.list_all().unwrap().iter().map(|a| a.period).collect();
        assert_eq!(periods, vec![p(2024, 11), p(2025, 1), p(2025, 2)]);
    }
}
