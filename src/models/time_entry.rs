use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: i64,       // ⇔ hours_worked.user_id
    pub date: NaiveDate,    // ⇔ hours_worked.date (TEXT "YYYY-MM-DD")
    pub hours: u32,         // 0..=24
    pub minutes: u32,       // 0..=59
    pub work_order_id: i64, // ⇔ hours_worked.work_order_id
    pub created_at: String, // ISO8601
}

impl TimeEntry {
    /// New, not yet persisted entry (`id = 0`).
    pub fn new(
        user_id: i64,
        date: NaiveDate,
        hours: u32,
        minutes: u32,
        work_order_id: i64,
    ) -> AppResult<Self> {
        validate_duration(hours, minutes)?;
        validate_work_order(work_order_id)?;

        Ok(Self {
            id: 0,
            user_id,
            date,
            hours,
            minutes,
            work_order_id,
            created_at: Local::now().to_rfc3339(),
        })
    }

    /// Duration as fractional hours.
    pub fn duration_hours(&self) -> f64 {
        self.hours as f64 + self.minutes as f64 / 60.0
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Partial update of a stored entry. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub date: Option<NaiveDate>,
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
    pub work_order_id: Option<i64>,
}

impl EntryPatch {
    pub fn apply_to(&self, entry: &mut TimeEntry) -> AppResult<()> {
        let hours = self.hours.unwrap_or(entry.hours);
        let minutes = self.minutes.unwrap_or(entry.minutes);
        let work_order_id = self.work_order_id.unwrap_or(entry.work_order_id);

        validate_duration(hours, minutes)?;
        validate_work_order(work_order_id)?;

        if let Some(d) = self.date {
            entry.date = d;
        }
        entry.hours = hours;
        entry.minutes = minutes;
        entry.work_order_id = work_order_id;
        Ok(())
    }
}

/// Time logged against one work order, minutes normalised below 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkOrderTotal {
    pub work_order_id: i64,
    #[serde(rename = "totalHours")]
    pub hours: u64,
    #[serde(rename = "totalMinutes")]
    pub minutes: u64,
}

impl WorkOrderTotal {
    pub fn from_parts<I>(work_order_id: i64, parts: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let (h, m) = parts
            .into_iter()
            .fold((0u64, 0u64), |(h, m), (eh, em)| (h + eh as u64, m + em as u64));

        Self {
            work_order_id,
            hours: h + m / 60,
            minutes: m % 60,
        }
    }
}

pub fn validate_duration(hours: u32, minutes: u32) -> AppResult<()> {
    if hours > 24 || minutes > 59 {
        return Err(AppError::InvalidTime(format!(
            "{hours}h {minutes}m (hours must be 0-24, minutes 0-59)"
        )));
    }
    Ok(())
}

fn validate_work_order(id: i64) -> AppResult<()> {
    if id < 1 {
        return Err(AppError::InvalidTime(format!("invalid work order id {id}")));
    }
    Ok(())
}
