pub mod commands;
pub mod parser;

use crate::config::Config;
use crate::core::ledger::LedgerService;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::role::Role;

/// Who is making the request. Authentication happens outside the ledger;
/// the CLI takes the identity from flags or the config defaults.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub role: Role,
    pub user_id: i64,
}

/// Everything a command handler needs.
pub struct Context {
    pub cfg: Config,
    pub caller: Caller,
}

impl Context {
    pub fn open_pool(&self) -> AppResult<DbPool> {
        DbPool::with_timeout(&self.cfg.database, self.cfg.lock_timeout())
    }

    pub fn ledger(&self) -> AppResult<LedgerService> {
        Ok(LedgerService::new(self.open_pool()?))
    }
}
