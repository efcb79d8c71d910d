// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

fn invalid(r: &str, why: &str) -> AppError {
    AppError::InvalidRange(format!("{r}: {why}"))
}

/// First and last day covered by a single `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn bounds(part: &str) -> Option<(NaiveDate, NaiveDate)> {
    match part.len() {
        4 => {
            let y: i32 = part.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{part}-01"), "%Y-%m-%d").ok()?;
            let next = if first.month() == 12 {
                NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
            };
            Some((first, next.pred_opt()?))
        }
        10 => {
            let d = NaiveDate::parse_from_str(part, "%Y-%m-%d").ok()?;
            Some((d, d))
        }
        _ => None,
    }
}

/// Parse `--range` into inclusive date bounds.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or `A:B` where both sides use
/// the same one of those formats.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    match r.split_once(':') {
        Some((start_raw, end_raw)) => {
            let (start, end) = (start_raw.trim(), end_raw.trim());
            if start.len() != end.len() {
                return Err(invalid(r, "start and end must have same format"));
            }

            let (from, _) = bounds(start).ok_or_else(|| invalid(r, "invalid start"))?;
            let (_, to) = bounds(end).ok_or_else(|| invalid(r, "invalid end"))?;
            if from > to {
                return Err(invalid(r, "start is after end"));
            }
            Ok((from, to))
        }
        None => bounds(r).ok_or_else(|| invalid(r, "unsupported format")),
    }
}
