use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

/// ANSI colour for an operation kind.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "allocate" => Colour::Green,
        "transfer" => Colour::Cyan,
        "hours_add" => Colour::Green,
        "hours_edit" => Colour::Yellow,
        "hours_del" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// "operation (target)", or just "operation" when the target is empty.
fn op_with_target(row: &LogRow) -> String {
    if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    }
}

/// Colour only the operation word, truncating the visible text to `max`.
fn render_op(row: &LogRow, max: usize) -> String {
    let visible = op_with_target(row);
    let truncated = if visible.chars().count() > max {
        let mut s: String = visible.chars().take(max - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    let color = color_for_operation(&row.operation);
    match truncated.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(truncated.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]")
            .map_err(|e| AppError::Config(format!("invalid ANSI pattern: {e}")))?;

        let op_w = entries
            .iter()
            .map(|r| op_with_target(r).chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|r| r.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for row in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&row.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| row.date.clone());

            let op = render_op(row, MAX_OP_WIDTH);
            // padding computed on the visible width, without ANSI codes
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&ansi, &op).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                date,
                op,
                padding,
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
