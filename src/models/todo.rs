use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Presentation-only styling of a todo title.
///
/// Stored as a JSON object; a missing key means "not applied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFormatting {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl TodoFormatting {
    pub fn is_plain(&self) -> bool {
        *self == TodoFormatting::default()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub formatting: TodoFormatting, // ⇔ todos.formatting (TEXT, JSON)
    pub created_at: String,
}

impl Todo {
    pub fn new(title: &str, priority: Priority, due_date: Option<NaiveDate>) -> Self {
        Self {
            id: 0,
            title: title.trim().to_string(),
            completed: false,
            priority,
            due_date,
            formatting: TodoFormatting::default(),
            created_at: Local::now().to_rfc3339(),
        }
    }
}
