pub mod allocation;
pub mod month_summary;
pub mod period;
pub mod role;
pub mod time_entry;
