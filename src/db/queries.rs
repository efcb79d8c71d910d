//! Snapshot loaders and lookups built on top of the record store.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Grade, ScheduleEntry, Subject, Todo};
use chrono::NaiveDate;
use rusqlite::types::Value;
use std::collections::HashMap;

pub fn load_subjects(pool: &DbPool) -> AppResult<Vec<Subject>> {
    pool.select::<Subject>(&[], "name COLLATE NOCASE ASC, id ASC")
}

/// Newest first.
pub fn load_grades(pool: &DbPool) -> AppResult<Vec<Grade>> {
    pool.select::<Grade>(&[], "date DESC, id DESC")
}

pub fn load_grades_for_subject(pool: &DbPool, subject_id: i64) -> AppResult<Vec<Grade>> {
    pool.select::<Grade>(&[("subject_id", Value::Integer(subject_id))], "date DESC, id DESC")
}

/// Grades whose date falls in `[from, to]`.
pub fn load_grades_between(pool: &DbPool, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Grade>> {
    Ok(load_grades(pool)?
        .into_iter()
        .filter(|g| g.date >= from && g.date <= to)
        .collect())
}

/// Ordered by day, then start time.
pub fn load_schedule(pool: &DbPool) -> AppResult<Vec<ScheduleEntry>> {
    pool.select::<ScheduleEntry>(&[], "day_of_week ASC, start_time ASC, id ASC")
}

/// Due date ascending (undated last), then newest first.
pub fn load_todos(pool: &DbPool) -> AppResult<Vec<Todo>> {
    pool.select::<Todo>(&[], "due_date IS NULL, due_date ASC, created_at DESC, id DESC")
}

/// Resolve a subject from an id or a (case-insensitive) name.
pub fn find_subject(pool: &DbPool, key: &str) -> AppResult<Subject> {
    let key = key.trim();

    if let Ok(id) = key.parse::<i64>() {
        return pool.find::<Subject>(id).map_err(|e| match e {
            AppError::NotFound { .. } => AppError::UnknownSubject(key.to_string()),
            other => other,
        });
    }

    load_subjects(pool)?
        .into_iter()
        .find(|s| s.name.to_lowercase() == key.to_lowercase())
        .ok_or_else(|| AppError::UnknownSubject(key.to_string()))
}

/// id → subject, for joining entries and grades with their subject.
pub fn subject_map(subjects: &[Subject]) -> HashMap<i64, &Subject> {
    subjects.iter().map(|s| (s.id, s)).collect()
}
