use crate::core::grades::{self, GradeReport};
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries::{find_subject, load_grades, load_grades_for_subject, load_subjects, subject_map};
use crate::errors::{AppError, AppResult};
use crate::models::{Grade, Subject};
use crate::utils::colors::{RESET, color_for_average, paint_block};
use crate::utils::formatting::{format_average, format_number, truncate};
use crate::utils::table::Table;
use chrono::NaiveDate;

pub struct GradeLogic;

/// A hypothetical grade: `VALUE/MAX` with an optional `xCOEF` suffix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulation {
    pub value: f64,
    pub max: f64,
    pub coefficient: f64,
}

/// Averages before and after adding a hypothetical grade.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub subject: String,
    pub subject_before: Option<f64>,
    pub subject_after: Option<f64>,
    pub general_before: Option<f64>,
    pub general_after: Option<f64>,
}

fn parse_number(raw: &str, what: &str) -> AppResult<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::InvalidNumber(format!("{what}: {raw}")))
}

/// Parse `15`, `15/20`, `7.5/10x2` (a bare value is out of `default_max`).
pub fn parse_simulation(raw: &str, default_max: f64) -> AppResult<Simulation> {
    let (score, coef) = match raw.split_once(['x', 'X', '*']) {
        Some((s, c)) => (s, parse_number(c, "coefficient")?),
        None => (raw, 1.0),
    };

    let (value, max) = match score.split_once('/') {
        Some((v, m)) => (parse_number(v, "value")?, parse_number(m, "max")?),
        None => (parse_number(score, "value")?, default_max),
    };

    validate(value, max, coef)?;
    Ok(Simulation {
        value,
        max,
        coefficient: coef,
    })
}

/// Reject values the aggregator cannot give a meaning to.
pub fn validate(value: f64, max: f64, coefficient: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidNumber(format!(
            "grade value must be >= 0, got {value}"
        )));
    }
    if !max.is_finite() || max <= 0.0 {
        return Err(AppError::InvalidNumber(format!(
            "grade max must be > 0, got {max}"
        )));
    }
    if !coefficient.is_finite() || coefficient < 0.0 {
        return Err(AppError::InvalidNumber(format!(
            "coefficient must be >= 0, got {coefficient}"
        )));
    }
    Ok(())
}

impl GradeLogic {
    pub fn add(
        pool: &DbPool,
        subject_key: &str,
        value: f64,
        max: f64,
        coefficient: f64,
        description: Option<String>,
        date: NaiveDate,
    ) -> AppResult<(Grade, Subject)> {
        validate(value, max, coefficient)?;
        let subject = find_subject(pool, subject_key)?;

        let mut grade = Grade::new(subject.id, value, max, coefficient, description, date);
        grade.id = pool.insert(&grade)?;

        write_log(
            &pool.conn,
            "add",
            &format!("grade#{}", grade.id),
            &format!(
                "{}/{} in {} ({})",
                format_number(value),
                format_number(max),
                subject.name,
                grade.date_str()
            ),
        )?;

        Ok((grade, subject))
    }

    pub fn del(pool: &DbPool, id: i64) -> AppResult<Grade> {
        let grade: Grade = pool.find(id)?;
        pool.delete::<Grade>(id)?;

        write_log(
            &pool.conn,
            "del",
            &format!("grade#{id}"),
            &format!(
                "Deleted grade {}/{} of {}",
                format_number(grade.value),
                format_number(grade.max),
                grade.date_str()
            ),
        )?;

        Ok(grade)
    }

    pub fn list(pool: &DbPool, subject_key: Option<&str>, separator: char) -> AppResult<String> {
        let subjects = load_subjects(pool)?;
        let grades = match subject_key {
            Some(key) => load_grades_for_subject(pool, find_subject(pool, key)?.id)?,
            None => load_grades(pool)?,
        };
        Ok(render_grades(&grades, &subjects, separator))
    }

    pub fn report(pool: &DbPool) -> AppResult<GradeReport> {
        let subjects = load_subjects(pool)?;
        let grades = load_grades(pool)?;
        Ok(grades::report(&subjects, &grades))
    }

    /// Averages if `sim` were added to `subject_key` today.
    pub fn simulate(pool: &DbPool, subject_key: &str, sim: Simulation) -> AppResult<SimulationOutcome> {
        let subject = find_subject(pool, subject_key)?;
        let subjects = load_subjects(pool)?;
        let grades = load_grades(pool)?;

        let extra = Grade::new(
            subject.id,
            sim.value,
            sim.max,
            sim.coefficient,
            None,
            crate::utils::date::today(),
        );
        let hypothetical = grades::with_hypothetical(&grades, extra);

        Ok(SimulationOutcome {
            subject: subject.name.clone(),
            subject_before: grades::subject_average(&grades, subject.id),
            subject_after: grades::subject_average(&hypothetical, subject.id),
            general_before: grades::general_average(&subjects, &grades),
            general_after: grades::general_average(&subjects, &hypothetical),
        })
    }
}

fn colored_average(avg: Option<f64>) -> String {
    match avg {
        Some(v) => format!("{}{}{}", color_for_average(v), format_average(avg), RESET),
        None => format_average(None),
    }
}

pub fn render_grades(grades: &[Grade], subjects: &[Subject], separator: char) -> String {
    if grades.is_empty() {
        return "No grades recorded.\n".to_string();
    }

    let by_id = subject_map(subjects);
    let mut table = Table::new(vec!["ID", "Date", "Subject", "Grade", "/20", "Coef", "Description"]);

    for g in grades {
        let subject = by_id
            .get(&g.subject_id)
            .map(|s| paint_block(&format!(" {} ", s.name), &s.color))
            .unwrap_or_default();

        table.add_row(vec![
            g.id.to_string(),
            g.date_str(),
            subject,
            format!("{}/{}", format_number(g.value), format_number(g.max)),
            format!("{:.2}", grades::normalize(g)),
            format_number(g.coefficient),
            truncate(g.description.as_deref().unwrap_or(""), 40),
        ]);
    }

    table.render(separator)
}

pub fn render_report(report: &GradeReport, separator: char) -> String {
    let mut table = Table::new(vec!["Subject", "Coef", "Grades", "Average"]);

    for s in &report.subjects {
        table.add_row(vec![
            paint_block(&format!(" {} ", s.name), &s.color),
            format_number(s.coefficient),
            s.grade_count.to_string(),
            colored_average(s.average),
        ]);
    }

    let mut out = table.render(separator);
    out.push('\n');
    out.push_str(&format!("General average: {}\n", colored_average(report.general)));
    out
}

pub fn render_simulation(outcome: &SimulationOutcome) -> String {
    format!(
        "Simulation for {}\n  subject average: {} → {}\n  general average: {} → {}\n",
        outcome.subject,
        colored_average(outcome.subject_before),
        colored_average(outcome.subject_after),
        colored_average(outcome.general_before),
        colored_average(outcome.general_after),
    )
}
