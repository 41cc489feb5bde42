use serde::Serialize;

/// One row of the yearly overview.
///
/// `remaining` may be negative: over-allocation is reported, not prevented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub available_hours: f64,
    pub worked_hours: f64,
    pub remaining_hours: f64,
}

impl MonthSummary {
    pub fn new(year: i32, month: u32, available_hours: f64, worked_hours: f64) -> Self {
        Self {
            year,
            month,
            available_hours,
            worked_hours,
            remaining_hours: available_hours - worked_hours,
        }
    }
}
