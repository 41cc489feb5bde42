//! Which role may do what. Runs at the request boundary, before the ledger
//! is touched; the ledger itself never looks at roles.

use crate::errors::{AppError, AppResult};
use crate::models::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadOverview,
    ReadWorked,
    ReadEntries,
    ListAllocations,
    SetAllocation,
    Transfer,
    LogTime,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::ReadOverview => "read the overview",
            Action::ReadWorked => "read worked hours",
            Action::ReadEntries => "read time entries",
            Action::ListAllocations => "list allocations",
            Action::SetAllocation => "set allocations",
            Action::Transfer => "transfer hours",
            Action::LogTime => "log time",
        }
    }
}

pub fn is_allowed(role: Role, action: Action) -> bool {
    match action {
        Action::ReadOverview | Action::ReadWorked | Action::ReadEntries => true,
        Action::ListAllocations | Action::SetAllocation | Action::Transfer => role.is_admin(),
        Action::LogTime => matches!(role, Role::Developer | Role::Admin),
    }
}

pub fn require(role: Role, action: Action) -> AppResult<()> {
    if is_allowed(role, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "role '{}' may not {}",
            role.as_str(),
            action.name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_mutates_the_ledger() {
        for action in [Action::SetAllocation, Action::Transfer, Action::ListAllocations] {
            assert!(require(Role::Admin, action).is_ok());
            assert!(require(Role::Developer, action).is_err());
            assert!(require(Role::Customer, action).is_err());
        }
    }

    #[test]
    fn developers_and_admins_log_time() {
        assert!(is_allowed(Role::Developer, Action::LogTime));
        assert!(is_allowed(Role::Admin, Action::LogTime));
        assert!(matches!(
            require(Role::Customer, Action::LogTime),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn anyone_reads() {
        for role in [Role::Customer, Role::Developer, Role::Admin] {
            assert!(is_allowed(role, Action::ReadOverview));
            assert!(is_allowed(role, Action::ReadWorked));
            assert!(is_allowed(role, Action::ReadEntries));
        }
    }
}
