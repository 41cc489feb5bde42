use crate::cli::Context;
use crate::cli::parser::HoursAction;
use crate::core::access::{self, Action};
use crate::core::time_log::TimeLog;
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::models::time_entry::{EntryPatch, TimeEntry};
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use crate::utils::hours2readable;
use crate::utils::table::{Column, Table};
use serde_json::json;

pub fn handle(action: &HoursAction, ctx: &Context) -> AppResult<()> {
    let caller = ctx.caller;

    match action {
        HoursAction::Add {
            date,
            hours,
            minutes,
            work_order,
        } => {
            access::require(caller.role, Action::LogTime)?;

            let date = parse_date(date)?;
            let mut pool = ctx.open_pool()?;
            let id = TimeLog::record(
                &mut pool,
                caller.user_id,
                date,
                *hours,
                *minutes,
                *work_order,
            )?;

            success(format!(
                "Logged {}h {:02}m on {} for work order {} (entry {})",
                hours, minutes, date, work_order, id
            ));
        }

        HoursAction::List { period } => {
            access::require(caller.role, Action::ReadEntries)?;

            let period: Option<Period> = period.as_deref().map(str::parse).transpose()?;
            let mut pool = ctx.open_pool()?;
            let entries: Vec<TimeEntry> = TimeLog::list(&mut pool)?
                .into_iter()
                .filter(|e| period.is_none_or(|p| p.contains(e.date)))
                .collect();

            if entries.is_empty() {
                println!("⚠️  No time entries found.");
            } else {
                print!("{}", render(&entries));
            }
        }

        HoursAction::Edit {
            id,
            date,
            hours,
            minutes,
            work_order,
        } => {
            access::require(caller.role, Action::LogTime)?;

            let patch = EntryPatch {
                date: date.as_deref().map(parse_date).transpose()?,
                hours: *hours,
                minutes: *minutes,
                work_order_id: *work_order,
            };

            let mut pool = ctx.open_pool()?;
            let entry = TimeLog::update(&mut pool, caller.user_id, caller.role, *id, &patch)?;

            success(format!(
                "Entry {} now {} {}h {:02}m on work order {}",
                entry.id,
                entry.date_str(),
                entry.hours,
                entry.minutes,
                entry.work_order_id
            ));
        }

        HoursAction::Del { id } => {
            access::require(caller.role, Action::LogTime)?;

            let mut pool = ctx.open_pool()?;
            TimeLog::delete(&mut pool, caller.user_id, caller.role, *id)?;
            success(format!("Entry {id} deleted"));
        }

        HoursAction::Total { work_order, json } => {
            access::require(caller.role, Action::ReadEntries)?;

            let mut pool = ctx.open_pool()?;
            let total = TimeLog::total_for_work_order(&mut pool, *work_order)?;

            if *json {
                println!(
                    "{}",
                    json!({ "totalHours": total.hours, "totalMinutes": total.minutes })
                );
            } else {
                println!(
                    "⏱️  Work order {}: {}h {:02}m",
                    total.work_order_id, total.hours, total.minutes
                );
            }
        }
    }

    Ok(())
}

fn render(entries: &[TimeEntry]) -> String {
    let mut table = Table::new(vec![
        Column::right("ID", 5),
        Column::left("Date", 10),
        Column::right("User", 5),
        Column::right("WO", 6),
        Column::right("Time", 8),
    ]);

    for e in entries {
        table.add_row(vec![
            e.id.to_string(),
            e.date_str(),
            e.user_id.to_string(),
            e.work_order_id.to_string(),
            hours2readable(e.duration_hours(), false, false),
        ]);
    }
    table.render()
}
