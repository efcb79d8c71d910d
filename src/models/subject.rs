use chrono::Local;
use serde::Serialize;

/// A school subject (course) owned by the configured user.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub color: String,            // ⇔ subjects.color (TEXT "#RRGGBB")
    pub coefficient: Option<f64>, // ⇔ subjects.coefficient (REAL, NULL = 1)
    pub is_default: bool,         // ⇔ subjects.is_default (seeded on first run)
    pub created_at: String,
}

impl Subject {
    /// New, not yet persisted subject (`id = 0`).
    pub fn new(name: &str, color: &str, coefficient: Option<f64>) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
            color: color.to_string(),
            coefficient,
            is_default: false,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Weight of this subject in the general average.
    ///
    /// An unset coefficient and a coefficient of `0` both count as `1`.
    pub fn effective_coefficient(&self) -> f64 {
        match self.coefficient {
            Some(c) if c != 0.0 => c,
            _ => 1.0,
        }
    }
}

/// Subjects inserted for a user that has none yet.
pub const DEFAULT_SUBJECTS: &[(&str, &str, f64)] = &[
    ("Mathématiques", "#45B7D1", 4.0),
    ("Français", "#FF6B9D", 4.0),
    ("Histoire-Géographie", "#FFA94D", 3.0),
    ("Anglais", "#6BCB77", 3.0),
    ("Espagnol", "#FFD93D", 2.0),
    ("Physique-Chimie", "#4ECDC4", 3.0),
    ("SVT", "#45B384", 3.0),
    ("SES", "#A8DADC", 2.0),
    ("EPS", "#FF8C42", 1.0),
    ("Philosophie", "#B4C7A3", 2.0),
];
