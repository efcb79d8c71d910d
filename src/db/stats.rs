use crate::db::db_utils::{DATA_TABLES, count_rows};
use crate::db::migrate::pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    header("Database info");

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!("{}• Owner:{} {}", CYAN, RESET, pool.owner);

    //
    // 2) ROWS PER TABLE
    //
    println!("{}• Rows:{}", CYAN, RESET);
    for table in DATA_TABLES {
        let count = count_rows(&pool.conn, table, &pool.owner)?;
        println!("    {:<17} {}{}{}", table, GREEN, count, RESET);
    }

    //
    // 3) GRADE DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM grades WHERE user_id = ?1 ORDER BY date ASC LIMIT 1",
            [&pool.owner],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM grades WHERE user_id = ?1 ORDER BY date DESC LIMIT 1",
            [&pool.owner],
            |row| row.get(0),
        )
        .optional()?;

    println!("{}• Grades from:{} {}", CYAN, RESET, or_dashes(first_date));
    println!("{}•         to:{} {}", CYAN, RESET, or_dashes(last_date));

    //
    // 4) SCHEMA STATE
    //
    let pending = pending_migrations(&pool.conn)?;
    if pending.is_empty() {
        println!("{}• Schema:{} {}up to date{}", CYAN, RESET, GREEN, RESET);
    } else {
        println!(
            "{}• Schema:{} {}{} pending migration(s){}",
            CYAN,
            RESET,
            YELLOW,
            pending.len(),
            RESET
        );
    }

    println!();
    Ok(())
}

fn or_dashes(v: Option<String>) -> String {
    v.unwrap_or_else(|| format!("{GREY}--{RESET}"))
}
