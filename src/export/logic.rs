// src/export/logic.rs

use crate::core::grades;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries::{load_grades, load_grades_between, load_schedule, load_subjects, load_todos};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{
    ExportRow, average_rows, grade_rows, schedule_rows, todo_rows,
};
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportTarget};
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

fn write_rows<T: ExportRow>(rows: &[T], format: ExportFormat, path: &Path, sheet: &str) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
        ExportFormat::Xlsx => export_xlsx(rows, path, sheet),
    }
}

impl ExportLogic {
    /// Export one dataset. Returns the number of rows written; nothing is
    /// written when the selection is empty.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"`, `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `A:B`
    ///   (grades only, by grade date)
    pub fn export(
        pool: &DbPool,
        what: ExportTarget,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };
        if bounds.is_some() && what != ExportTarget::Grades {
            warning(format!("--range only applies to grades, ignored for {}.", what.as_str()));
        }

        let subjects = load_subjects(pool)?;
        let sheet = what.as_str();

        let count = match what {
            ExportTarget::Grades => {
                let list = match bounds {
                    Some((from, to)) => load_grades_between(pool, from, to)?,
                    None => load_grades(pool)?,
                };
                let rows = grade_rows(&list, &subjects);
                Self::write_checked(&rows, format, path, force, sheet)?
            }
            ExportTarget::Averages => {
                let report = grades::report(&subjects, &load_grades(pool)?);
                let rows = if report.subjects.is_empty() {
                    Vec::new()
                } else {
                    average_rows(&report)
                };
                Self::write_checked(&rows, format, path, force, sheet)?
            }
            ExportTarget::Schedule => {
                let rows = schedule_rows(&load_schedule(pool)?, &subjects);
                Self::write_checked(&rows, format, path, force, sheet)?
            }
            ExportTarget::Todos => {
                let rows = todo_rows(&load_todos(pool)?);
                Self::write_checked(&rows, format, path, force, sheet)?
            }
        };

        if count > 0 {
            write_log(
                &pool.conn,
                "export",
                &path.to_string_lossy(),
                &format!("{} {} rows as {}", count, what.as_str(), format.as_str()),
            )?;
        }

        Ok(count)
    }

    fn write_checked<T: ExportRow>(
        rows: &[T],
        format: ExportFormat,
        path: &Path,
        force: bool,
        sheet: &str,
    ) -> AppResult<usize> {
        if rows.is_empty() {
            warning("No data found for the selected export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;
        write_rows(rows, format, path, sheet)?;
        Ok(rows.len())
    }
}
