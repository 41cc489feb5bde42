use crate::cli::Context;
use crate::cli::parser::Commands;
use crate::core::access::{self, Action};
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date::current_year;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        year,
        force,
    } = cmd
    {
        access::require(ctx.caller.role, Action::ReadOverview)?;

        let year = year.unwrap_or_else(current_year);
        let mut ledger = ctx.ledger()?;
        ExportLogic::export_overview(&mut ledger, year, *format, file, *force)?;
    }

    Ok(())
}
