use crate::core::backup::zip_file;
use crate::db::db_utils::{DATA_TABLES, database_path, has_column, table_exists};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result};
use std::path::Path;

/// A schema step, identified by a sortable version string.
struct Migration {
    version: &'static str,
    description: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250901_0001_core_schema",
        description: "Created subjects, grades, schedule_entries and todos tables",
        apply: create_core_schema,
    },
    Migration {
        version: "20250915_0002_subject_coefficients",
        description: "Added coefficient and is_default to subjects",
        apply: add_subject_coefficients,
    },
    Migration {
        version: "20251002_0003_todo_formatting",
        description: "Added formatting column to todos",
        apply: add_todo_formatting,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_core_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS subjects (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            name        TEXT NOT NULL CHECK(length(trim(name)) > 0),
            color       TEXT NOT NULL DEFAULT '#FF6B9D',
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS grades (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      TEXT NOT NULL,
            subject_id   INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
            grade_value  REAL NOT NULL,
            grade_max    REAL NOT NULL CHECK(grade_max > 0),
            coefficient  REAL NOT NULL DEFAULT 1,
            description  TEXT,
            date         TEXT NOT NULL,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS schedule_entries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      TEXT NOT NULL,
            subject_id   INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
            day_of_week  INTEGER NOT NULL CHECK(day_of_week BETWEEN 0 AND 6),
            start_time   TEXT NOT NULL,
            end_time     TEXT NOT NULL,
            week_type    TEXT NOT NULL DEFAULT 'both' CHECK(week_type IN ('both','week1','week2')),
            recurrence   TEXT NOT NULL DEFAULT 'none' CHECK(recurrence IN ('none','weekly','biweekly')),
            created_at   TEXT NOT NULL,
            CHECK(end_time > start_time)
        );

        CREATE TABLE IF NOT EXISTS todos (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            title       TEXT NOT NULL CHECK(length(trim(title)) > 0),
            completed   INTEGER NOT NULL DEFAULT 0,
            priority    TEXT NOT NULL DEFAULT 'medium' CHECK(priority IN ('low','medium','high')),
            due_date    TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_subjects_user ON subjects(user_id, name);
        CREATE INDEX IF NOT EXISTS idx_grades_subject ON grades(subject_id, date);
        CREATE INDEX IF NOT EXISTS idx_schedule_day ON schedule_entries(user_id, day_of_week, start_time);
        CREATE INDEX IF NOT EXISTS idx_todos_due ON todos(user_id, due_date);
        "#,
    )
}

fn add_subject_coefficients(conn: &Connection) -> Result<()> {
    if !has_column(conn, "subjects", "coefficient")? {
        conn.execute("ALTER TABLE subjects ADD COLUMN coefficient REAL;", [])?;
    }
    if !has_column(conn, "subjects", "is_default")? {
        conn.execute(
            "ALTER TABLE subjects ADD COLUMN is_default INTEGER NOT NULL DEFAULT 0;",
            [],
        )?;
    }
    Ok(())
}

fn add_todo_formatting(conn: &Connection) -> Result<()> {
    if !has_column(conn, "todos", "formatting")? {
        conn.execute(
            "ALTER TABLE todos ADD COLUMN formatting TEXT NOT NULL DEFAULT '{}';",
            [],
        )?;
    }
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions not yet recorded in the `log` table.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Zip the database next to itself before touching an existing schema.
fn backup_before_migration(conn: &Connection, first_pending: &str) -> AppResult<()> {
    let db_path = database_path(conn);
    if db_path.is_empty() {
        warning("Could not determine DB path, backup skipped.");
        return Ok(());
    }

    let src = Path::new(&db_path);
    let backup_name = format!(
        "{}-backup_db_pre_{}.zip",
        Local::now().format("%Y%m%d_%H%M%S"),
        first_pending
    );
    let dest = src.with_file_name(backup_name);

    zip_file(src, &dest, "database.sqlite")?;
    success(format!("📦 Backup created: {}", dest.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() every time a connection is opened.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let pending = pending_migrations(conn)?;
    if pending.is_empty() {
        return Ok(());
    }

    // Existing data → safety copy first
    let mut has_data = false;
    for table in DATA_TABLES {
        has_data |= table_exists(conn, table)?;
    }
    if has_data {
        warning("Pending database migrations, creating safety backup...");
        backup_before_migration(conn, pending[0])?;
    }

    for m in MIGRATIONS.iter().filter(|m| pending.contains(&m.version)) {
        (m.apply)(conn).map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.description],
        )?;

        if has_data {
            success(format!("Migration applied: {} → {}", m.version, m.description));
        }
    }

    Ok(())
}
