//! Row mapping between the SQLite tables and the domain models.

use crate::db::store::{Record, bool_value, opt_text, text};
use crate::errors::AppError;
use crate::models::{
    Grade, Priority, Recurrence, ScheduleEntry, Subject, Todo, TodoFormatting, WeekParity,
};
use chrono::{NaiveDate, NaiveTime, Weekday};
use rusqlite::Row;
use rusqlite::types::{Type, Value};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

fn parse_date_col(raw: String, col: usize) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| conversion_error(col, AppError::InvalidDate(raw)))
}

fn parse_time_col(raw: String, col: usize) -> rusqlite::Result<NaiveTime> {
    // older rows may carry seconds ("09:00:00")
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
        .map_err(|_| conversion_error(col, AppError::InvalidTime(raw)))
}

impl Record for Subject {
    const ENTITY: &'static str = "Subject";
    const TABLE: &'static str = "subjects";
    const COLUMNS: &'static [&'static str] = &["name", "color", "coefficient", "is_default", "created_at"];

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Subject {
            id: row.get("id")?,
            name: row.get("name")?,
            color: row.get("color")?,
            coefficient: row.get("coefficient")?,
            is_default: row.get::<_, i64>("is_default")? == 1,
            created_at: row.get("created_at")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.name),
            text(&self.color),
            self.coefficient.map_or(Value::Null, Value::Real),
            bool_value(self.is_default),
            text(&self.created_at),
        ]
    }
}

impl Record for Grade {
    const ENTITY: &'static str = "Grade";
    const TABLE: &'static str = "grades";
    const COLUMNS: &'static [&'static str] = &[
        "subject_id",
        "grade_value",
        "grade_max",
        "coefficient",
        "description",
        "date",
        "created_at",
    ];

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Grade {
            id: row.get("id")?,
            subject_id: row.get("subject_id")?,
            value: row.get("grade_value")?,
            max: row.get("grade_max")?,
            coefficient: row.get("coefficient")?,
            description: row.get("description")?,
            date: parse_date_col(row.get("date")?, 6)?,
            created_at: row.get("created_at")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.subject_id),
            Value::Real(self.value),
            Value::Real(self.max),
            Value::Real(self.coefficient),
            opt_text(self.description.as_deref()),
            text(&self.date_str()),
            text(&self.created_at),
        ]
    }
}

impl Record for ScheduleEntry {
    const ENTITY: &'static str = "Schedule entry";
    const TABLE: &'static str = "schedule_entries";
    const COLUMNS: &'static [&'static str] = &[
        "subject_id",
        "day_of_week",
        "start_time",
        "end_time",
        "week_type",
        "recurrence",
        "created_at",
    ];

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let day_raw: u8 = row.get("day_of_week")?;
        let day = Weekday::try_from(day_raw)
            .map_err(|_| conversion_error(2, AppError::InvalidDay(day_raw.to_string())))?;

        let week_raw: String = row.get("week_type")?;
        let week = WeekParity::from_db_str(&week_raw)
            .ok_or_else(|| conversion_error(5, AppError::Other(format!("Invalid week type: {week_raw}"))))?;

        let rec_raw: String = row.get("recurrence")?;
        let recurrence = Recurrence::from_db_str(&rec_raw)
            .ok_or_else(|| conversion_error(6, AppError::Other(format!("Invalid recurrence: {rec_raw}"))))?;

        Ok(ScheduleEntry {
            id: row.get("id")?,
            subject_id: row.get("subject_id")?,
            day,
            start: parse_time_col(row.get("start_time")?, 3)?,
            end: parse_time_col(row.get("end_time")?, 4)?,
            week,
            recurrence,
            created_at: row.get("created_at")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.subject_id),
            Value::Integer(self.day_index() as i64),
            text(&self.start_str()),
            text(&self.end_str()),
            text(self.week.to_db_str()),
            text(self.recurrence.to_db_str()),
            text(&self.created_at),
        ]
    }
}

impl Record for Todo {
    const ENTITY: &'static str = "Todo";
    const TABLE: &'static str = "todos";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "completed",
        "priority",
        "due_date",
        "formatting",
        "created_at",
    ];

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let prio_raw: String = row.get("priority")?;
        let priority = Priority::from_db_str(&prio_raw)
            .ok_or_else(|| conversion_error(3, AppError::InvalidPriority(prio_raw)))?;

        let due_date = match row.get::<_, Option<String>>("due_date")? {
            Some(raw) if !raw.is_empty() => Some(parse_date_col(raw, 4)?),
            _ => None,
        };

        // unreadable formatting degrades to plain text
        let fmt_raw: String = row.get("formatting")?;
        let formatting: TodoFormatting = serde_json::from_str(&fmt_raw).unwrap_or_default();

        Ok(Todo {
            id: row.get("id")?,
            title: row.get("title")?,
            completed: row.get::<_, i64>("completed")? == 1,
            priority,
            due_date,
            formatting,
            created_at: row.get("created_at")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.title),
            bool_value(self.completed),
            text(self.priority.to_db_str()),
            opt_text(
                self.due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .as_deref(),
            ),
            text(&formatting_json(&self.formatting)),
            text(&self.created_at),
        ]
    }
}

/// JSON text stored in `todos.formatting`.
pub fn formatting_json(fmt: &TodoFormatting) -> String {
    serde_json::to_string(fmt).unwrap_or_else(|_| "{}".to_string())
}
