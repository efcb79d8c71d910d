//! Grade aggregation: grades → subject averages → general average.
//!
//! Every grade is first brought onto a common 20-point scale, then averaged
//! with its own coefficient. Subject averages are averaged again with the
//! subject coefficients. The two coefficient spaces never mix.
//!
//! All functions are pure: they borrow a snapshot and return a value.
//! `None` means "no average to report", which is not the same as `0.0`.

use crate::models::{Grade, Subject};
use serde::Serialize;

/// Common scale every grade is normalized to.
pub const GRADE_SCALE: f64 = 20.0;

/// `value / max * 20`. The caller guarantees `max > 0`.
pub fn normalize(grade: &Grade) -> f64 {
    grade.value / grade.max * GRADE_SCALE
}

/// Weighted mean of the normalized grades of one subject.
pub fn subject_average(grades: &[Grade], subject_id: i64) -> Option<f64> {
    let mut total_weighted = 0.0;
    let mut total_coefficients = 0.0;
    let mut seen = false;

    for g in grades.iter().filter(|g| g.subject_id == subject_id) {
        seen = true;
        total_weighted += normalize(g) * g.coefficient;
        total_coefficients += g.coefficient;
    }

    if !seen || total_coefficients == 0.0 {
        return None;
    }

    Some(total_weighted / total_coefficients)
}

/// Weighted mean of the subject averages, using subject coefficients.
///
/// Subjects without an average are left out entirely.
pub fn general_average(subjects: &[Subject], grades: &[Grade]) -> Option<f64> {
    let mut total_weighted = 0.0;
    let mut total_coefficients = 0.0;

    for subject in subjects {
        if let Some(avg) = subject_average(grades, subject.id) {
            let coeff = subject.effective_coefficient();
            total_weighted += avg * coeff;
            total_coefficients += coeff;
        }
    }

    if total_coefficients > 0.0 {
        Some(total_weighted / total_coefficients)
    } else {
        None
    }
}

/// One row of a [`GradeReport`].
#[derive(Debug, Clone, Serialize)]
pub struct SubjectSummary {
    pub subject_id: i64,
    pub name: String,
    pub color: String,
    pub coefficient: f64,
    pub grade_count: usize,
    pub average: Option<f64>,
}

/// Per-subject averages plus the general average, in subject order.
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub subjects: Vec<SubjectSummary>,
    pub general: Option<f64>,
}

pub fn report(subjects: &[Subject], grades: &[Grade]) -> GradeReport {
    let rows = subjects
        .iter()
        .map(|s| SubjectSummary {
            subject_id: s.id,
            name: s.name.clone(),
            color: s.color.clone(),
            coefficient: s.effective_coefficient(),
            grade_count: grades.iter().filter(|g| g.subject_id == s.id).count(),
            average: subject_average(grades, s.id),
        })
        .collect();

    GradeReport {
        subjects: rows,
        general: general_average(subjects, grades),
    }
}

/// Snapshot extended with one unsaved grade, for "what if" previews.
///
/// The caller's slice is left untouched.
pub fn with_hypothetical(grades: &[Grade], extra: Grade) -> Vec<Grade> {
    let mut out = Vec::with_capacity(grades.len() + 1);
    out.extend_from_slice(grades);
    out.push(extra);
    out
}
