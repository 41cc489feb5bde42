use crate::models::month_summary::MonthSummary;
use serde::Serialize;

/// Flat overview row for CSV / JSON export.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct OverviewExport {
    pub period: String,
    pub year: i32,
    pub month: u32,
    pub available_hours: f64,
    pub worked_hours: f64,
    pub remaining_hours: f64,
}

impl From<&MonthSummary> for OverviewExport {
    fn from(m: &MonthSummary) -> Self {
        Self {
            period: format!("{:04}-{:02}", m.year, m.month),
            year: m.year,
            month: m.month,
            available_hours: m.available_hours,
            worked_hours: m.worked_hours,
            remaining_hours: m.remaining_hours,
        }
    }
}
