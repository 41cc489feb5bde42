//! Recording and maintaining time entries: the local source the ledger
//! aggregates from.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::time_entries::{
    delete_entry, durations_for_work_order, insert_entry, list_entries, load_entry, update_entry,
};
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::time_entry::{EntryPatch, TimeEntry, WorkOrderTotal};
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct TimeLog;

impl TimeLog {
    /// Log time for `user_id`; returns the new entry id.
    pub fn record(
        pool: &mut DbPool,
        user_id: i64,
        date: NaiveDate,
        hours: u32,
        minutes: u32,
        work_order_id: i64,
    ) -> AppResult<i64> {
        let entry = TimeEntry::new(user_id, date, hours, minutes, work_order_id)?;

        pool.write_tx(|conn| {
            let id = insert_entry(conn, &entry)?;
            ttlog(
                conn,
                "hours_add",
                &format!("entry {id}"),
                &format!(
                    "{} {}h {:02}m on work order {} (user {})",
                    entry.date_str(),
                    hours,
                    minutes,
                    work_order_id,
                    user_id
                ),
            )?;
            Ok(id)
        })
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Vec<TimeEntry>> {
        list_entries(&pool.conn)
    }

    /// Change an entry. Only its owner or an admin may do so.
    pub fn update(
        pool: &mut DbPool,
        actor_id: i64,
        role: Role,
        id: i64,
        patch: &EntryPatch,
    ) -> AppResult<TimeEntry> {
        pool.write_tx(|conn| {
            let mut entry = load_owned(conn, actor_id, role, id)?;
            patch.apply_to(&mut entry)?;
            update_entry(conn, &entry)?;
            ttlog(
                conn,
                "hours_edit",
                &format!("entry {id}"),
                &format!(
                    "{} {}h {:02}m on work order {}",
                    entry.date_str(),
                    entry.hours,
                    entry.minutes,
                    entry.work_order_id
                ),
            )?;
            Ok(entry)
        })
    }

    /// Remove an entry. Only its owner or an admin may do so.
    pub fn delete(pool: &mut DbPool, actor_id: i64, role: Role, id: i64) -> AppResult<()> {
        pool.write_tx(|conn| {
            let entry = load_owned(conn, actor_id, role, id)?;
            delete_entry(conn, id)?;
            ttlog(
                conn,
                "hours_del",
                &format!("entry {id}"),
                &format!("Deleted {} entry of user {}", entry.date_str(), entry.user_id),
            )?;
            Ok(())
        })
    }

    /// Total time logged against a work order, minutes below 60.
    pub fn total_for_work_order(pool: &mut DbPool, work_order_id: i64) -> AppResult<WorkOrderTotal> {
        let parts = durations_for_work_order(&pool.conn, work_order_id)?;
        Ok(WorkOrderTotal::from_parts(work_order_id, parts))
    }
}

fn load_owned(conn: &Connection, actor_id: i64, role: Role, id: i64) -> AppResult<TimeEntry> {
    let entry = load_entry(conn, id)?.ok_or_else(|| AppError::NotFound(format!("entry {id}")))?;

    if entry.user_id != actor_id && !role.is_admin() {
        return Err(AppError::Forbidden(format!(
            "entry {id} belongs to another user"
        )));
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn record_and_list() {
        let mut pool = DbPool::in_memory().unwrap();
        let a = TimeLog::record(&mut pool, 2, d("2025-01-03"), 2, 30, 5).unwrap();
        let b = TimeLog::record(&mut pool, 2, d("2025-01-02"), 1, 0, 5).unwrap();
        assert_ne!(a, b);

        let all = TimeLog::list(&mut pool).unwrap();
        assert_eq!(all.len(), 2);
        // ordered by date
        assert_eq!(all[0].id, b);
        assert_eq!(all[1].hours, 2);
    }

    #[test]
    fn record_rejects_invalid_time() {
        let mut pool = DbPool::in_memory().unwrap();
        assert!(matches!(
            TimeLog::record(&mut pool, 2, d("2025-01-03"), 25, 0, 5),
            Err(AppError::InvalidTime(_))
        ));
        assert!(TimeLog::list(&mut pool).unwrap().is_empty());
    }

    #[test]
    fn only_owner_or_admin_may_edit_or_delete() {
        let mut pool = DbPool::in_memory().unwrap();
        let id = TimeLog::record(&mut pool, 2, d("2025-01-03"), 2, 30, 5).unwrap();

        let patch = EntryPatch {
            hours: Some(3),
            ..Default::default()
        };

        assert!(matches!(
            TimeLog::update(&mut pool, 9, Role::Developer, id, &patch),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            TimeLog::delete(&mut pool, 9, Role::Developer, id),
            Err(AppError::Forbidden(_))
        ));

        let updated = TimeLog::update(&mut pool, 2, Role::Developer, id, &patch).unwrap();
        assert_eq!((updated.hours, updated.minutes), (3, 30));

        TimeLog::delete(&mut pool, 1, Role::Admin, id).unwrap();
        assert!(TimeLog::list(&mut pool).unwrap().is_empty());
    }

    #[test]
    fn missing_entry_is_not_found() {
        let mut pool = DbPool::in_memory().unwrap();
        assert!(matches!(
            TimeLog::delete(&mut pool, 1, Role::Admin, 42),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn work_order_total_normalises_minutes() {
        let mut pool = DbPool::in_memory().unwrap();
        TimeLog::record(&mut pool, 2, d("2025-01-03"), 2, 30, 5).unwrap();
        TimeLog::record(&mut pool, 3, d("2025-02-03"), 1, 45, 5).unwrap();
        TimeLog::record(&mut pool, 3, d("2025-02-04"), 8, 0, 6).unwrap();

        let total = TimeLog::total_for_work_order(&mut pool, 5).unwrap();
        assert_eq!((total.hours, total.minutes), (4, 15));

        let none = TimeLog::total_for_work_order(&mut pool, 99).unwrap();
        assert_eq!((none.hours, none.minutes), (0, 0));
    }
}
