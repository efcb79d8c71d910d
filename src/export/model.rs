// src/export/model.rs

use crate::core::grades::{self, GradeReport};
use crate::db::queries::subject_map;
use crate::models::{Grade, ScheduleEntry, Subject, Todo};
use crate::utils::date::day_label;
use serde::Serialize;

/// Flat record written by every exporter (CSV header comes from serde,
/// XLSX header from `headers`).
pub trait ExportRow: Serialize {
    fn headers() -> Vec<&'static str>;
    fn to_row(&self) -> Vec<String>;
}

fn opt_num(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}")).unwrap_or_default()
}

#[derive(Serialize, Clone, Debug)]
pub struct GradeExport {
    pub id: i64,
    pub date: String,
    pub subject: String,
    pub value: f64,
    pub max: f64,
    pub normalized: f64,
    pub coefficient: f64,
    pub description: String,
}

impl ExportRow for GradeExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "id",
            "date",
            "subject",
            "value",
            "max",
            "normalized",
            "coefficient",
            "description",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.clone(),
            self.subject.clone(),
            self.value.to_string(),
            self.max.to_string(),
            format!("{:.2}", self.normalized),
            self.coefficient.to_string(),
            self.description.clone(),
        ]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct AverageExport {
    pub subject: String,
    pub coefficient: f64,
    pub grades: usize,
    pub average: Option<f64>,
}

impl ExportRow for AverageExport {
    fn headers() -> Vec<&'static str> {
        vec!["subject", "coefficient", "grades", "average"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.subject.clone(),
            self.coefficient.to_string(),
            self.grades.to_string(),
            opt_num(self.average),
        ]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ScheduleExport {
    pub id: i64,
    pub day: String,
    pub start: String,
    pub end: String,
    pub subject: String,
    pub week: String,
    pub recurrence: String,
}

impl ExportRow for ScheduleExport {
    fn headers() -> Vec<&'static str> {
        vec!["id", "day", "start", "end", "subject", "week", "recurrence"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.day.clone(),
            self.start.clone(),
            self.end.clone(),
            self.subject.clone(),
            self.week.clone(),
            self.recurrence.clone(),
        ]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct TodoExport {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub priority: String,
    pub due_date: String,
    pub created_at: String,
}

impl ExportRow for TodoExport {
    fn headers() -> Vec<&'static str> {
        vec!["id", "title", "completed", "priority", "due_date", "created_at"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            if self.completed { "yes" } else { "no" }.to_string(),
            self.priority.clone(),
            self.due_date.clone(),
            self.created_at.clone(),
        ]
    }
}

pub fn grade_rows(grades: &[Grade], subjects: &[Subject]) -> Vec<GradeExport> {
    let by_id = subject_map(subjects);
    grades
        .iter()
        .map(|g| GradeExport {
            id: g.id,
            date: g.date_str(),
            subject: by_id
                .get(&g.subject_id)
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            value: g.value,
            max: g.max,
            normalized: grades::normalize(g),
            coefficient: g.coefficient,
            description: g.description.clone().unwrap_or_default(),
        })
        .collect()
}

/// One row per subject, then a `General` row.
pub fn average_rows(report: &GradeReport) -> Vec<AverageExport> {
    let mut rows: Vec<AverageExport> = report
        .subjects
        .iter()
        .map(|s| AverageExport {
            subject: s.name.clone(),
            coefficient: s.coefficient,
            grades: s.grade_count,
            average: s.average,
        })
        .collect();

    rows.push(AverageExport {
        subject: "General".to_string(),
        coefficient: 1.0,
        grades: report.subjects.iter().map(|s| s.grade_count).sum(),
        average: report.general,
    });
    rows
}

pub fn schedule_rows(entries: &[ScheduleEntry], subjects: &[Subject]) -> Vec<ScheduleExport> {
    let by_id = subject_map(subjects);
    entries
        .iter()
        .map(|e| ScheduleExport {
            id: e.id,
            day: day_label(e.day).to_string(),
            start: e.start_str(),
            end: e.end_str(),
            subject: by_id
                .get(&e.subject_id)
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            week: e.week.to_db_str().to_string(),
            recurrence: e.recurrence.to_db_str().to_string(),
        })
        .collect()
}

pub fn todo_rows(todos: &[Todo]) -> Vec<TodoExport> {
    todos
        .iter()
        .map(|t| TodoExport {
            id: t.id,
            title: t.title.clone(),
            completed: t.completed,
            priority: t.priority.to_db_str().to_string(),
            due_date: t
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            created_at: t.created_at.clone(),
        })
        .collect()
}
