pub mod access;
pub mod ledger;
pub mod log;
pub mod time_log;
pub mod transfer;
pub mod worked;
