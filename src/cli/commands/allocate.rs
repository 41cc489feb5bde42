use crate::cli::Context;
use crate::cli::parser::Commands;
use crate::core::access::{self, Action};
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::ui::messages::success;
use crate::utils::fmt_hours;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Allocate { period, hours } = cmd {
        access::require(ctx.caller.role, Action::SetAllocation)?;

        let period: Period = period.parse()?;
        let saved = ctx.ledger()?.set_allocation(period, *hours)?;

        success(format!(
            "Available hours for {} set to {}",
            saved.period,
            fmt_hours(saved.available_hours, ctx.cfg.hours_decimals)
        ));
    }

    Ok(())
}
