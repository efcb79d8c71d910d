//! Timetable placement on a day × hour grid.
//!
//! A cell is `(day, hour)`. An entry occupies every cell whose one-hour slot
//! overlaps its `[start, end)` interval, and is drawn once, as a block that
//! starts on the row of its start hour and spans `end_hour - start_hour` rows.

use crate::models::{ScheduleEntry, WeekFilter};
use chrono::{NaiveTime, Timelike, Weekday};

pub const DEFAULT_FIRST_HOUR: u32 = 7;
pub const DEFAULT_LAST_HOUR: u32 = 20;

/// Grid columns, Monday-first.
pub const DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Entries occupying the cell `(day, hour)` under the given week filter.
///
/// Overlap is half-open: an entry ending at 11:00 does not occupy hour 11.
pub fn entries_for_cell(
    entries: &[ScheduleEntry],
    day: Weekday,
    hour: u32,
    filter: WeekFilter,
) -> Vec<&ScheduleEntry> {
    let cell_start = hour * 60;
    let cell_end = (hour + 1) * 60;

    entries
        .iter()
        .filter(|e| {
            e.day == day
                && e.start_minutes() < cell_end
                && e.end_minutes() > cell_start
                && filter.accepts(e.week)
        })
        .collect()
}

/// True iff the block of `entry` begins on the row of `hour`.
pub fn is_block_start(entry: &ScheduleEntry, hour: u32) -> bool {
    entry.start.hour() == hour
}

/// Span of the block in whole rows; minutes are ignored.
pub fn duration(entry: &ScheduleEntry) -> u32 {
    entry.end.hour().saturating_sub(entry.start.hour())
}

/// Move `entry` so its block starts at `(new_day, new_hour)`.
///
/// The row span and the minute components of both ends are preserved.
/// Collisions at the destination are not checked. Returns `None` when the
/// moved entry would end past 23:59, which is not a wall-clock time.
pub fn reschedule(entry: &ScheduleEntry, new_day: Weekday, new_hour: u32) -> Option<ScheduleEntry> {
    let span = duration(entry);
    let start = NaiveTime::from_hms_opt(new_hour, entry.start.minute(), 0)?;
    let end = NaiveTime::from_hms_opt(new_hour + span, entry.end.minute(), 0)?;

    Some(ScheduleEntry {
        day: new_day,
        start,
        end,
        ..entry.clone()
    })
}

/// What a single grid cell shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Empty,
    /// First row of a block.
    Start { entry: &'a ScheduleEntry, span: u32 },
    /// Row already drawn by a block that started earlier.
    Covered(&'a ScheduleEntry),
}

#[derive(Debug, Clone)]
pub struct GridRow<'a> {
    pub hour: u32,
    pub cells: Vec<Cell<'a>>,
}

/// Rows `first_hour..=last_hour`, seven cells each.
#[derive(Debug, Clone)]
pub struct Grid<'a> {
    pub rows: Vec<GridRow<'a>>,
}

/// Resolve every cell of the grid. Only the first matching entry of a cell is
/// considered; overlapping entries are not reported.
pub fn layout(
    entries: &[ScheduleEntry],
    filter: WeekFilter,
    first_hour: u32,
    last_hour: u32,
) -> Grid<'_> {
    let rows = (first_hour..=last_hour)
        .map(|hour| {
            let cells = DAYS
                .iter()
                .map(|day| match entries_for_cell(entries, *day, hour, filter).first().copied() {
                    Some(entry) if is_block_start(entry, hour) => Cell::Start {
                        entry,
                        span: duration(entry),
                    },
                    Some(entry) => Cell::Covered(entry),
                    None => Cell::Empty,
                })
                .collect();
            GridRow { hour, cells }
        })
        .collect();

    Grid { rows }
}
