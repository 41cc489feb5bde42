use crate::cli::Context;
use crate::cli::parser::Commands;
use crate::core::access::{self, Action};
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::ui::messages::{info, success};
use crate::utils::fmt_hours;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Transfer { from, to, hours } = cmd {
        access::require(ctx.caller.role, Action::Transfer)?;

        let from: Period = from.parse()?;
        let to: Period = to.parse()?;
        let d = ctx.cfg.hours_decimals;

        let out = ctx.ledger()?.apply_transfer(from, to, *hours)?;

        success(format!(
            "Moved {} hours from {} to {}",
            fmt_hours(*hours, d),
            out.from.period,
            out.to.period
        ));
        info(format!(
            "{}: {} available",
            out.from.period,
            fmt_hours(out.from.available_hours, d)
        ));
        info(format!(
            "{}: {} available",
            out.to.period,
            fmt_hours(out.to.available_hours, d)
        ));
    }

    Ok(())
}
