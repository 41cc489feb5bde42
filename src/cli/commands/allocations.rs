use crate::cli::Context;
use crate::cli::parser::Commands;
use crate::core::access::{self, Action};
use crate::errors::{AppError, AppResult};
use crate::models::allocation::Allocation;
use crate::utils::fmt_hours;
use crate::utils::table::{Column, Table};
use serde_json::json;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Allocations { json } = cmd {
        access::require(ctx.caller.role, Action::ListAllocations)?;

        let rows = ctx.ledger()?.list_allocations()?;

        if *json {
            let items: Vec<_> = rows
                .iter()
                .map(|a| {
                    json!({
                        "period": a.period.to_string(),
                        "available_hours": a.available_hours,
                    })
                })
                .collect();
            let out =
                serde_json::to_string_pretty(&items).map_err(|e| AppError::Export(e.to_string()))?;
            println!("{out}");
        } else if rows.is_empty() {
            println!("⚠️  No allocations stored.");
        } else {
            print!("{}", render(&rows, ctx.cfg.hours_decimals));
        }
    }

    Ok(())
}

fn render(rows: &[Allocation], decimals: usize) -> String {
    let mut table = Table::new(vec![Column::left("Period", 8), Column::right("Available", 10)]);
    for a in rows {
        table.add_row(vec![
            a.period.to_string(),
            fmt_hours(a.available_hours, decimals),
        ]);
    }
    table.render()
}
