//! Worked hours: always derived from time entries, never stored.

use crate::db::time_entries::entries_between;
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::models::time_entry::TimeEntry;
use rusqlite::Connection;

/// Anything that can hand out the time entries dated within a period.
pub trait TimeEntrySource {
    fn entries_in(&self, period: Period) -> AppResult<Vec<TimeEntry>>;
}

/// The `hours_worked` table. A single SELECT reads one snapshot, so an
/// entry is either fully counted or not at all.
impl TimeEntrySource for Connection {
    fn entries_in(&self, period: Period) -> AppResult<Vec<TimeEntry>> {
        entries_between(self, period.first_day(), period.last_day())
    }
}

/// An in-memory entry set.
impl TimeEntrySource for [TimeEntry] {
    fn entries_in(&self, period: Period) -> AppResult<Vec<TimeEntry>> {
        Ok(self
            .iter()
            .filter(|e| Period::of_date(e.date) == period)
            .cloned()
            .collect())
    }
}

pub struct WorkedHoursAggregator<'s, S: TimeEntrySource + ?Sized> {
    source: &'s S,
}

impl<'s, S: TimeEntrySource + ?Sized> WorkedHoursAggregator<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self { source }
    }

    /// Total hours logged in `period`, regardless of user or work order.
    pub fn worked_hours(&self, period: Period) -> AppResult<f64> {
        let entries = self.source.entries_in(period)?;
        Ok(sum_hours(&entries))
    }
}

/// Sum in whole minutes first: the result does not depend on entry order.
pub fn sum_hours(entries: &[TimeEntry]) -> f64 {
    let minutes: u64 = entries
        .iter()
        .map(|e| e.hours as u64 * 60 + e.minutes as u64)
        .sum();
    minutes as f64 / 60.0
}
