//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(rusqlite::Error),

    /// The database could not take the write lock (or complete the
    /// statement) in time. Nothing was committed; the caller may retry.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid period: {0} (expected YYYY-MM)")]
    InvalidPeriod(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid role: {0} (expected customer, developer or admin)")]
    InvalidRole(String),

    // ---------------------------
    // Ledger rules
    // ---------------------------
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error(
        "Insufficient balance in {period}: {available} h available, {requested} h requested"
    )]
    InsufficientBalance {
        period: String,
        available: f64,
        requested: f64,
    },

    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    // ---------------------------
    // Access / lookup
    // ---------------------------
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// True when the failure left no partial state and a blind retry is safe.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::StorageUnavailable(_))
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
                AppError::StorageUnavailable(e.to_string())
            }
            _ => AppError::Db(e),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_sqlite_error_is_retryable() {
        let busy = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".into()),
        );
        let err = AppError::from(busy);
        assert!(matches!(err, AppError::StorageUnavailable(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn other_sqlite_errors_are_not_retryable() {
        let err = AppError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, AppError::Db(_)));
        assert!(!err.is_retryable());

        let err = AppError::InvalidAmount("-1".into());
        assert!(!err.is_retryable());
    }
}
