pub mod allocate;
pub mod allocations;
pub mod config;
pub mod db;
pub mod export;
pub mod hours;
pub mod init;
pub mod log;
pub mod overview;
pub mod transfer;
pub mod worked;
