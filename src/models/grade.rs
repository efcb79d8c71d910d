use chrono::{Local, NaiveDate};
use serde::Serialize;

/// One scored assessment.
///
/// `value` and `max` are only ever used as a ratio, so `value > max`
/// is representable.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Grade {
    pub id: i64,
    pub subject_id: i64,
    pub value: f64,       // ⇔ grades.grade_value
    pub max: f64,         // ⇔ grades.grade_max (> 0)
    pub coefficient: f64, // ⇔ grades.coefficient (default 1)
    pub description: Option<String>,
    pub date: NaiveDate, // ⇔ grades.date (TEXT "YYYY-MM-DD")
    pub created_at: String,
}

impl Grade {
    pub fn new(
        subject_id: i64,
        value: f64,
        max: f64,
        coefficient: f64,
        description: Option<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            subject_id,
            value,
            max,
            coefficient,
            description: description.filter(|d| !d.trim().is_empty()),
            date,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
