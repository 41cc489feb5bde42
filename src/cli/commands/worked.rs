use crate::cli::Context;
use crate::cli::parser::Commands;
use crate::core::access::{self, Action};
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::utils::{fmt_hours, hours2readable};
use serde_json::json;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Worked { period, json } = cmd {
        access::require(ctx.caller.role, Action::ReadWorked)?;

        let period: Period = period.parse()?;
        let total = ctx.ledger()?.worked_hours(period)?;

        if *json {
            println!("{}", json!({ "totalWorked": total }));
        } else {
            println!(
                "⏱️  Worked in {}: {} ({})",
                period,
                fmt_hours(total, ctx.cfg.hours_decimals),
                hours2readable(total, false, false)
            );
        }
    }

    Ok(())
}
