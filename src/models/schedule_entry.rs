use chrono::{Local, NaiveTime, Timelike, Weekday};
use clap::ValueEnum;
use serde::Serialize;

/// A/B alternating-week tag of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeekParity {
    Both,
    Week1,
    Week2,
}

impl WeekParity {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WeekParity::Both => "both",
            WeekParity::Week1 => "week1",
            WeekParity::Week2 => "week2",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "both" => Some(WeekParity::Both),
            "week1" => Some(WeekParity::Week1),
            "week2" => Some(WeekParity::Week2),
            _ => None,
        }
    }

    /// Short badge shown next to the subject name ("" for every-week entries).
    pub fn badge(&self) -> &'static str {
        match self {
            WeekParity::Both => "",
            WeekParity::Week1 => "S1",
            WeekParity::Week2 => "S2",
        }
    }
}

/// Which weeks the timetable is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeekFilter {
    All,
    Week1,
    Week2,
}

impl WeekFilter {
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Some(WeekFilter::All),
            "week1" => Some(WeekFilter::Week1),
            "week2" => Some(WeekFilter::Week2),
            _ => None,
        }
    }

    pub fn accepts(&self, parity: WeekParity) -> bool {
        match (self, parity) {
            (WeekFilter::All, _) | (_, WeekParity::Both) => true,
            (WeekFilter::Week1, WeekParity::Week1) | (WeekFilter::Week2, WeekParity::Week2) => {
                true
            }
            _ => false,
        }
    }
}

/// Descriptive recurrence tag; it never generates extra entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    None,
    Weekly,
    Biweekly,
}

impl Recurrence {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Weekly => "weekly",
            Recurrence::Biweekly => "biweekly",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Recurrence::None),
            "weekly" => Some(Recurrence::Weekly),
            "biweekly" => Some(Recurrence::Biweekly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recurrence::None => "",
            Recurrence::Weekly => "weekly",
            Recurrence::Biweekly => "biweekly",
        }
    }
}

/// One recurring timetable block.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduleEntry {
    pub id: i64,
    pub subject_id: i64,
    pub day: Weekday,     // ⇔ schedule_entries.day_of_week (0-6, Monday-first)
    pub start: NaiveTime, // ⇔ schedule_entries.start_time (TEXT "HH:MM")
    pub end: NaiveTime,   // ⇔ schedule_entries.end_time (TEXT "HH:MM")
    pub week: WeekParity,
    pub recurrence: Recurrence,
    pub created_at: String,
}

impl ScheduleEntry {
    pub fn new(
        subject_id: i64,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
        week: WeekParity,
        recurrence: Recurrence,
    ) -> Self {
        Self {
            id: 0,
            subject_id,
            day,
            start,
            end,
            week,
            recurrence,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn day_index(&self) -> u8 {
        self.day.num_days_from_monday() as u8
    }

    pub fn start_minutes(&self) -> u32 {
        self.start.hour() * 60 + self.start.minute()
    }

    pub fn end_minutes(&self) -> u32 {
        self.end.hour() * 60 + self.end.minute()
    }

    pub fn start_str(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%H:%M").to_string()
    }

    /// "09:00 - 11:00"
    pub fn time_span(&self) -> String {
        format!("{} - {}", self.start_str(), self.end_str())
    }
}
