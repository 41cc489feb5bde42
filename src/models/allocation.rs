use super::period::Period;
use serde::Serialize;

/// Budgeted hours for one period (one row of `monthly_allocations`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Allocation {
    pub period: Period,
    pub available_hours: f64,
}

/// Balances of both sides after a transfer, for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransferOutcome {
    pub from: Allocation,
    pub to: Allocation,
}
