//! Time utilities: parsing HH:MM and grid hours.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn parse_time_arg(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        Ok(Some(parse_time_arg(s)?))
    } else {
        Ok(None)
    }
}

/// Grid row: `"14"` or `"14:00"` (minutes must be zero).
pub fn parse_hour(s: &str) -> AppResult<u32> {
    let raw = s.trim();

    if let Ok(h) = raw.parse::<u32>() {
        if h < 24 {
            return Ok(h);
        }
        return Err(AppError::InvalidTime(s.to_string()));
    }

    match parse_time(raw) {
        Some(t) if t.minute() == 0 => Ok(t.hour()),
        _ => Err(AppError::InvalidTime(s.to_string())),
    }
}

/// One hour after `t`, if still the same day.
pub fn plus_one_hour(t: NaiveTime) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(t.hour() + 1, t.minute(), 0)
}
