//! Small schema inspection helpers shared by migrations and `db --info`.

use rusqlite::{Connection, OptionalExtension, Result};

/// Tables holding user data, in dependency order (parents first).
pub const DATA_TABLES: [&str; 4] = ["subjects", "grades", "schedule_entries", "todos"];

/// Check if a table exists.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if `table` has a column named `column`.
pub fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Path of the main database file, empty for in-memory databases.
pub fn database_path(conn: &Connection) -> String {
    conn.query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default()
}

/// Number of rows in `table` owned by `owner`.
pub fn count_rows(conn: &Connection, table: &str, owner: &str) -> Result<i64> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE user_id = ?1"),
        [owner],
        |row| row.get(0),
    )
}
