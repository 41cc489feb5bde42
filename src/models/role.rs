use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Caller role, supplied by whoever authenticated the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Developer,
    Admin,
}

impl Role {
    /// Parse a role name, case-insensitive.
    pub fn from_name(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "developer" | "dev" => Ok(Role::Developer),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::InvalidRole(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Developer => "developer",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}
