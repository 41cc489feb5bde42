use crate::cli::Context;
use crate::cli::parser::Commands;
use crate::core::access::{self, Action};
use crate::errors::{AppError, AppResult};
use crate::models::month_summary::MonthSummary;
use crate::ui::messages::header;
use crate::utils::colors::{color_for_amount, color_for_remaining, paint};
use crate::utils::date::current_year;
use crate::utils::fmt_hours;
use crate::utils::formatting::month_name;
use crate::utils::table::{Column, Table};
use serde_json::json;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Overview { year, json } = cmd {
        access::require(ctx.caller.role, Action::ReadOverview)?;

        let year = year.unwrap_or_else(current_year);
        let rows = ctx.ledger()?.overview(year)?;

        if *json {
            println!("{}", to_json(&rows)?);
        } else {
            header(format!("Overview {year}"));
            print!("{}", render(&rows, ctx.cfg.hours_decimals));
        }
    }

    Ok(())
}

fn to_json(rows: &[MonthSummary]) -> AppResult<String> {
    let items: Vec<_> = rows
        .iter()
        .map(|r| {
            json!({
                "month": r.month,
                "available_hours": r.available_hours,
                "worked_hours": r.worked_hours,
                "remaining_hours": r.remaining_hours,
            })
        })
        .collect();

    serde_json::to_string_pretty(&items).map_err(|e| AppError::Export(e.to_string()))
}

fn render(rows: &[MonthSummary], decimals: usize) -> String {
    let mut table = Table::new(vec![
        Column::left("Month", 10),
        Column::right("Available", 10),
        Column::right("Worked", 10),
        Column::right("Remaining", 10),
    ]);

    let (mut available, mut worked) = (0.0, 0.0);
    for r in rows {
        available += r.available_hours;
        worked += r.worked_hours;
        table.add_row(vec![
            month_name(r.month).to_string(),
            paint(
                color_for_amount(r.available_hours),
                &fmt_hours(r.available_hours, decimals),
            ),
            paint(
                color_for_amount(r.worked_hours),
                &fmt_hours(r.worked_hours, decimals),
            ),
            paint(
                color_for_remaining(r.remaining_hours),
                &fmt_hours(r.remaining_hours, decimals),
            ),
        ]);
    }

    let remaining = available - worked;
    table.add_row(vec![
        "Total".to_string(),
        fmt_hours(available, decimals),
        fmt_hours(worked, decimals),
        paint(color_for_remaining(remaining), &fmt_hours(remaining, decimals)),
    ]);

    table.render()
}
