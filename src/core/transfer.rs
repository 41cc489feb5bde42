//! Moving budget between two periods.
//!
//! The whole read-check-write runs inside one `BEGIN IMMEDIATE`
//! transaction: SQLite grants the write lock before the source balance is
//! read, so no other transfer or `set` can interleave. Any error, or
//! dropping the transaction mid-way, rolls both balances back.

use crate::db::allocations::AllocationStore;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::allocation::{Allocation, TransferOutcome};
use crate::models::period::Period;
use rusqlite::Connection;

pub struct TransferEngine;

impl TransferEngine {
    /// Move `hours` of budget from `from` to `to`, all or nothing.
    ///
    /// Fails with `InvalidAmount` for non-positive or non-finite hours,
    /// `InvalidTransfer` when `from == to`, `InsufficientBalance` when the
    /// source cannot cover the amount, and `StorageUnavailable` when the
    /// write lock cannot be obtained within the busy timeout.
    pub fn transfer(
        pool: &mut DbPool,
        from: Period,
        to: Period,
        hours: f64,
    ) -> AppResult<TransferOutcome> {
        validate_request(from, to, hours)?;
        pool.write_tx(|tx| Self::transfer_locked(tx, from, to, hours))
    }

    /// Transfer body. `conn` must be inside a write transaction.
    pub(crate) fn transfer_locked(
        conn: &Connection,
        from: Period,
        to: Period,
        hours: f64,
    ) -> AppResult<TransferOutcome> {
        let store = AllocationStore::new(conn);

        let from_hours = store.get(from)?;
        if from_hours < hours {
            return Err(AppError::InsufficientBalance {
                period: from.to_string(),
                available: from_hours,
                requested: hours,
            });
        }

        let new_from = from_hours - hours;
        store.set(from, new_from)?;

        let new_to = store.get(to)? + hours;
        store.set(to, new_to)?;

        ttlog(
            conn,
            "transfer",
            &format!("{from} -> {to}"),
            &format!("Moved {hours} h: {from} now {new_from} h, {to} now {new_to} h"),
        )?;

        Ok(TransferOutcome {
            from: Allocation {
                period: from,
                available_hours: new_from,
            },
            to: Allocation {
                period: to,
                available_hours: new_to,
            },
        })
    }
}

/// Checks that need no database access; they run before any lock is taken.
pub fn validate_request(from: Period, to: Period, hours: f64) -> AppResult<()> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(AppError::InvalidAmount(format!(
            "{hours} (transfer amount must be a finite number > 0)"
        )));
    }
    if from == to {
        return Err(AppError::InvalidTransfer(format!(
            "source and destination are both {from}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(y: i32, m: u32) -> Period {
        Period::new(y, m).unwrap()
    }

    fn balance(pool: &DbPool, period: Period) -> f64 {
        AllocationStore::new(&pool.conn).get(period).unwrap()
    }

    fn seeded(jan: f64, feb: f64) -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        let store = AllocationStore::new(&pool.conn);
        store.set(p(2025, 1), jan).unwrap();
        store.set(p(2025, 2), feb).unwrap();
        pool
    }

    #[test]
    fn moves_hours_and_conserves_total() {
        let mut pool = seeded(40.0, 0.0);

        let out = TransferEngine::transfer(&mut pool, p(2025, 1), p(2025, 2), 10.0).unwrap();

        assert_eq!(out.from.available_hours, 30.0);
        assert_eq!(out.to.available_hours, 10.0);
        assert_eq!(balance(&pool, p(2025, 1)), 30.0);
        assert_eq!(balance(&pool, p(2025, 2)), 10.0);
    }

    #[test]
    fn insufficient_balance_changes_nothing() {
        let mut pool = seeded(30.0, 10.0);

        let err = TransferEngine::transfer(&mut pool, p(2025, 1), p(2025, 2), 35.0).unwrap_err();
        assert!(matches!(err, AppError::InsufficientBalance { .. }));

        assert_eq!(balance(&pool, p(2025, 1)), 30.0);
        assert_eq!(balance(&pool, p(2025, 2)), 10.0);
    }

    #[test]
    fn full_balance_can_be_moved() {
        let mut pool = seeded(7.5, 0.0);
        TransferEngine::transfer(&mut pool, p(2025, 1), p(2025, 2), 7.5).unwrap();
        assert_eq!(balance(&pool, p(2025, 1)), 0.0);
        assert_eq!(balance(&pool, p(2025, 2)), 7.5);
    }

    #[test]
    fn unset_source_is_zero_and_rejected() {
        let mut pool = DbPool::in_memory().unwrap();

        let err = TransferEngine::transfer(&mut pool, p(2025, 3), p(2025, 4), 5.0).unwrap_err();
        assert!(matches!(err, AppError::InsufficientBalance { .. }));

        // no rows were created by the failed attempt
        assert!(AllocationStore::new(&pool.conn).list_all().unwrap().is_empty());
    }

    #[test]
    fn destination_is_created_when_missing() {
        let mut pool = DbPool::in_memory().unwrap();
        AllocationStore::new(&pool.conn).set(p(2025, 1), 20.0).unwrap();

        TransferEngine::transfer(&mut pool, p(2025, 1), p(2026, 7), 4.0).unwrap();
        assert_eq!(balance(&pool, p(2026, 7)), 4.0);
    }

    #[test]
    fn non_positive_or_non_finite_amounts_are_invalid() {
        let mut pool = seeded(40.0, 0.0);

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = TransferEngine::transfer(&mut pool, p(2025, 1), p(2025, 2), bad).unwrap_err();
            assert!(matches!(err, AppError::InvalidAmount(_)), "{bad}");
        }

        assert_eq!(balance(&pool, p(2025, 1)), 40.0);
        assert_eq!(balance(&pool, p(2025, 2)), 0.0);
    }

    #[test]
    fn same_period_is_rejected() {
        let mut pool = seeded(40.0, 0.0);
        let err = TransferEngine::transfer(&mut pool, p(2025, 1), p(2025, 1), 5.0).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransfer(_)));
        assert_eq!(balance(&pool, p(2025, 1)), 40.0);
    }

    #[test]
    fn amount_is_checked_before_same_period() {
        let err = validate_request(p(2025, 1), p(2025, 1), 0.0).unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount(_)));
    }

    #[test]
    fn failed_destination_write_rolls_back_debit() {
        let mut pool = seeded(f64::MAX, f64::MAX);

        // MAX + MAX overflows to infinity, which the store refuses to persist
        let err =
            TransferEngine::transfer(&mut pool, p(2025, 1), p(2025, 2), f64::MAX).unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount(_)));

        assert_eq!(balance(&pool, p(2025, 1)), f64::MAX);
        assert_eq!(balance(&pool, p(2025, 2)), f64::MAX);
    }

    #[test]
    fn successful_transfer_is_audited() {
        let mut pool = seeded(40.0, 0.0);
        TransferEngine::transfer(&mut pool, p(2025, 1), p(2025, 2), 10.0).unwrap();
        let _ = TransferEngine::transfer(&mut pool, p(2025, 1), p(2025, 2), 100.0);

        let rows = crate::db::log::load_log_for(&pool.conn, "transfer").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].target, "2025-01 -> 2025-02");
    }
}
