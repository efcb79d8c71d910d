use crate::core::timetable::{self, Cell, DAYS};
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries::{find_subject, load_schedule, load_subjects, subject_map};
use crate::db::store::{Patch, text};
use crate::errors::{AppError, AppResult};
use crate::models::{Recurrence, ScheduleEntry, Subject, WeekFilter, WeekParity};
use crate::utils::colors::{FALLBACK_BLOCK_COLOR, GREY, RESET, paint_block};
use crate::utils::date::day_label;
use crate::utils::formatting::truncate;
use crate::utils::table::{Table, pad_right};
use crate::utils::time::plus_one_hour;
use chrono::{NaiveTime, Weekday};
use rusqlite::types::Value;
use std::collections::HashMap;

/// Visible width of one day column in the grid.
const CELL_WIDTH: usize = 14;

pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Create a slot. Without `end` the slot lasts one hour.
    pub fn add(
        pool: &DbPool,
        subject_key: &str,
        day: Weekday,
        start: NaiveTime,
        end: Option<NaiveTime>,
        week: WeekParity,
        recurrence: Recurrence,
    ) -> AppResult<(ScheduleEntry, Subject)> {
        let subject = find_subject(pool, subject_key)?;

        let end = match end {
            Some(e) => e,
            None => plus_one_hour(start).ok_or_else(|| {
                AppError::InvalidRange(format!("{} + 1h is past midnight", start.format("%H:%M")))
            })?,
        };
        if end <= start {
            return Err(AppError::InvalidRange(format!(
                "end {} must be after start {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            )));
        }

        let mut entry = ScheduleEntry::new(subject.id, day, start, end, week, recurrence);
        entry.id = pool.insert(&entry)?;

        write_log(
            &pool.conn,
            "add",
            &format!("schedule#{}", entry.id),
            &format!(
                "{} on {} {}",
                subject.name,
                day_label(day),
                entry.time_span()
            ),
        )?;

        Ok((entry, subject))
    }

    /// Move a slot to another day and start hour, keeping its length.
    pub fn move_entry(pool: &DbPool, id: i64, day: Weekday, hour: u32) -> AppResult<ScheduleEntry> {
        let current: ScheduleEntry = pool.find(id)?;

        let moved = timetable::reschedule(&current, day, hour).ok_or_else(|| {
            AppError::InvalidRange(format!(
                "slot #{id} would end after 23:59 when starting at {hour:02}:00"
            ))
        })?;

        let patch: Patch = vec![
            ("day_of_week", Value::Integer(i64::from(moved.day_index()))),
            ("start_time", text(&moved.start_str())),
            ("end_time", text(&moved.end_str())),
        ];
        pool.update::<ScheduleEntry>(id, &patch)?;

        write_log(
            &pool.conn,
            "move",
            &format!("schedule#{id}"),
            &format!(
                "{} {} → {} {}",
                day_label(current.day),
                current.time_span(),
                day_label(moved.day),
                moved.time_span()
            ),
        )?;

        Ok(moved)
    }

    pub fn del(pool: &DbPool, id: i64) -> AppResult<ScheduleEntry> {
        let entry: ScheduleEntry = pool.find(id)?;
        pool.delete::<ScheduleEntry>(id)?;

        write_log(
            &pool.conn,
            "del",
            &format!("schedule#{id}"),
            &format!("Deleted slot {} {}", day_label(entry.day), entry.time_span()),
        )?;

        Ok(entry)
    }

    pub fn list(pool: &DbPool, separator: char) -> AppResult<String> {
        let subjects = load_subjects(pool)?;
        let entries = load_schedule(pool)?;
        Ok(render_list(&entries, &subjects, separator))
    }

    pub fn show(pool: &DbPool, filter: WeekFilter, first_hour: u32, last_hour: u32) -> AppResult<String> {
        let subjects = load_subjects(pool)?;
        let entries = load_schedule(pool)?;
        Ok(render_grid(&entries, &subjects, filter, first_hour, last_hour))
    }
}

pub fn render_list(entries: &[ScheduleEntry], subjects: &[Subject], separator: char) -> String {
    if entries.is_empty() {
        return "No slots in the timetable.\n".to_string();
    }

    let by_id = subject_map(subjects);
    let mut table = Table::new(vec!["ID", "Day", "Time", "Subject", "Week", "Recurrence"]);

    for e in entries {
        let subject = by_id
            .get(&e.subject_id)
            .map(|s| paint_block(&format!(" {} ", s.name), &s.color))
            .unwrap_or_default();

        table.add_row(vec![
            e.id.to_string(),
            day_label(e.day).to_string(),
            e.time_span(),
            subject,
            e.week.badge().to_string(),
            e.recurrence.label().to_string(),
        ]);
    }

    table.render(separator)
}

fn block_text(entry: &ScheduleEntry, by_id: &HashMap<i64, &Subject>) -> (String, String) {
    let badge = entry.week.badge();
    match by_id.get(&entry.subject_id) {
        Some(s) if badge.is_empty() => (s.name.clone(), s.color.clone()),
        Some(s) => (format!("{} {}", s.name, badge), s.color.clone()),
        // orphaned slot keeps its week badge
        None => (badge.to_string(), FALLBACK_BLOCK_COLOR.to_string()),
    }
}

/// Weekly grid, one row per hour and one column per day.
pub fn render_grid(
    entries: &[ScheduleEntry],
    subjects: &[Subject],
    filter: WeekFilter,
    first_hour: u32,
    last_hour: u32,
) -> String {
    let by_id = subject_map(subjects);
    let grid = timetable::layout(entries, filter, first_hour, last_hour);
    let mut out = String::new();

    out.push_str("      ");
    for day in DAYS {
        out.push_str(&pad_right(&truncate(day_label(day), CELL_WIDTH), CELL_WIDTH));
        out.push(' ');
    }
    out.push('\n');

    for row in &grid.rows {
        out.push_str(&format!("{GREY}{:02}:00{RESET} ", row.hour));

        for cell in &row.cells {
            let rendered = match cell {
                Cell::Empty => " ".repeat(CELL_WIDTH),
                Cell::Start { entry, .. } => {
                    let (label, color) = block_text(entry, &by_id);
                    let content = pad_right(&truncate(&format!(" {label}"), CELL_WIDTH), CELL_WIDTH);
                    paint_block(&content, &color)
                }
                Cell::Covered(entry) => {
                    let (_, color) = block_text(entry, &by_id);
                    paint_block(&pad_right(" │", CELL_WIDTH), &color)
                }
            };
            out.push_str(&rendered);
            out.push(' ');
        }
        out.push('\n');
    }

    out
}
