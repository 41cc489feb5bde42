use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ALLOCATIONS
    //
    let (alloc_count, alloc_total): (i64, f64) = pool.conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(available_hours), 0) FROM monthly_allocations",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    println!(
        "{}• Allocated periods:{} {}{}{} ({:.2} h available in total)",
        CYAN, RESET, GREEN, alloc_count, RESET, alloc_total
    );

    //
    // 3) TIME ENTRIES + DATE RANGE
    //
    let entry_count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM hours_worked", [], |row| row.get(0))?;
    println!(
        "{}• Time entries:{} {}{}{}",
        CYAN, RESET, GREEN, entry_count, RESET
    );

    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(date), MAX(date) FROM hours_worked",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let fmt = |v: Option<String>| v.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Entry date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    println!();
    Ok(())
}
