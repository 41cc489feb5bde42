//! Façade over the allocation store, the worked-hours aggregator and the
//! transfer engine. The service is role-agnostic: callers authorise first
//! (see `core::access`).

use crate::core::transfer::TransferEngine;
use crate::core::worked::WorkedHoursAggregator;
use crate::db::allocations::AllocationStore;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::allocation::{Allocation, TransferOutcome};
use crate::models::month_summary::MonthSummary;
use crate::models::period::Period;

pub struct LedgerService {
    pool: DbPool,
}

impl LedgerService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&mut self) -> &mut DbPool {
        &mut self.pool
    }

    /// Available, worked and remaining hours for each month of `year`,
    /// January to December, read from one snapshot.
    pub fn overview(&mut self, year: i32) -> AppResult<Vec<MonthSummary>> {
        let periods = Period::months_of(year)?;

        self.pool.read_tx(|conn| {
            let store = AllocationStore::new(conn);
            let worked = WorkedHoursAggregator::new(conn);

            let mut rows = Vec::with_capacity(periods.len());
            for p in &periods {
                rows.push(MonthSummary::new(
                    p.year(),
                    p.month(),
                    store.get(*p)?,
                    worked.worked_hours(*p)?,
                ));
            }
            Ok(rows)
        })
    }

    /// Set (insert or overwrite) the budget of a period.
    pub fn set_allocation(&mut self, period: Period, hours: f64) -> AppResult<Allocation> {
        self.pool.write_tx(|conn| {
            AllocationStore::new(conn).set(period, hours)?;
            ttlog(
                conn,
                "allocate",
                &period.to_string(),
                &format!("Available hours for {period} set to {hours}"),
            )?;
            Ok(Allocation {
                period,
                available_hours: hours,
            })
        })
    }

    /// Move budget between two periods; returns both updated balances.
    pub fn apply_transfer(
        &mut self,
        from: Period,
        to: Period,
        hours: f64,
    ) -> AppResult<TransferOutcome> {
        TransferEngine::transfer(&mut self.pool, from, to, hours)
    }

    pub fn available_hours(&mut self, period: Period) -> AppResult<f64> {
        AllocationStore::new(&self.pool.conn).get(period)
    }

    pub fn worked_hours(&mut self, period: Period) -> AppResult<f64> {
        WorkedHoursAggregator::new(&self.pool.conn).worked_hours(period)
    }

    pub fn list_allocations(&mut self) -> AppResult<Vec<Allocation>> {
        AllocationStore::new(&self.pool.conn).list_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::time_entries::insert_entry;
    use crate::errors::AppError;
    use crate::models::time_entry::TimeEntry;
    use chrono::NaiveDate;

    fn p(y: i32, m: u32) -> Period {
        Period::new(y, m).unwrap()
    }

    fn service() -> LedgerService {
        LedgerService::new(DbPool::in_memory().unwrap())
    }

    fn log_time(svc: &mut LedgerService, date: &str, h: u32, m: u32) {
        let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let e = TimeEntry::new(2, d, h, m, 1).unwrap();
        insert_entry(&svc.pool().conn, &e).unwrap();
    }

    #[test]
    fn overview_lists_twelve_months_with_remaining() {
        let mut svc = service();
        svc.set_allocation(p(2025, 1), 40.0).unwrap();
        svc.set_allocation(p(2025, 3), 2.0).unwrap();
        log_time(&mut svc, "2025-01-10", 2, 30);
        log_time(&mut svc, "2025-01-11", 1, 45);
        log_time(&mut svc, "2025-03-05", 3, 0);

        let rows = svc.overview(2025).unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(
            rows.iter().map(|r| r.month).collect::<Vec<_>>(),
            (1..=12u32).collect::<Vec<_>>()
        );

        assert_eq!(rows[0].available_hours, 40.0);
        assert_eq!(rows[0].worked_hours, 4.25);
        assert_eq!(rows[0].remaining_hours, 35.75);

        // over-allocation is reported as negative remaining
        assert_eq!(rows[2].remaining_hours, -1.0);

        assert_eq!(rows[5].available_hours, 0.0);
        assert_eq!(rows[5].worked_hours, 0.0);
    }

    #[test]
    fn set_allocation_validates_amount() {
        let mut svc = service();
        assert!(matches!(
            svc.set_allocation(p(2025, 1), -3.0),
            Err(AppError::InvalidAmount(_))
        ));
        assert!(svc.list_allocations().unwrap().is_empty());
    }

    #[test]
    fn january_february_scenario() {
        let mut svc = service();
        svc.set_allocation(p(2025, 1), 40.0).unwrap();
        svc.set_allocation(p(2025, 2), 0.0).unwrap();

        let out = svc.apply_transfer(p(2025, 1), p(2025, 2), 10.0).unwrap();
        assert_eq!(out.from.available_hours, 30.0);
        assert_eq!(out.to.available_hours, 10.0);

        let err = svc.apply_transfer(p(2025, 1), p(2025, 2), 35.0).unwrap_err();
        assert!(matches!(err, AppError::InsufficientBalance { .. }));
        assert_eq!(svc.available_hours(p(2025, 1)).unwrap(), 30.0);
        assert_eq!(svc.available_hours(p(2025, 2)).unwrap(), 10.0);
    }

    #[test]
    fn mutations_are_audited() {
        let mut svc = service();
        svc.set_allocation(p(2025, 5), 12.0).unwrap();

        let rows = crate::db::log::load_log_for(&svc.pool().conn, "allocate").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].target, "2025-05");
    }
}
