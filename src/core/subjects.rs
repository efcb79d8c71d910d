use crate::core::grades;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries::{find_subject, load_grades, load_subjects};
use crate::db::store::{Patch, text};
use crate::errors::{AppError, AppResult};
use crate::models::subject::DEFAULT_SUBJECTS;
use crate::models::{Grade, Subject};
use crate::utils::colors::{DEFAULT_SUBJECT_COLOR, SUBJECT_PALETTE, paint_block, resolve_color};
use crate::utils::formatting::{format_average, format_number};
use crate::utils::table::Table;
use rusqlite::types::Value;

pub struct SubjectLogic;

/// Optional changes for `SubjectLogic::edit`.
#[derive(Debug, Default)]
pub struct SubjectEdit {
    pub name: Option<String>,
    pub color: Option<String>,
    pub coefficient: Option<f64>,
}

pub fn validate_coefficient(c: f64) -> AppResult<f64> {
    if !c.is_finite() || c < 0.0 {
        return Err(AppError::InvalidNumber(format!(
            "coefficient must be a number >= 0, got {c}"
        )));
    }
    Ok(c)
}

fn validate_name(pool: &DbPool, name: &str, except_id: Option<i64>) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Empty("Subject name"));
    }

    let clash = load_subjects(pool)?
        .iter()
        .any(|s| Some(s.id) != except_id && s.name.to_lowercase() == name.to_lowercase());
    if clash {
        return Err(AppError::DuplicateSubject(name.to_string()));
    }

    Ok(name.to_string())
}

impl SubjectLogic {
    pub fn add(
        pool: &DbPool,
        name: &str,
        color: Option<&str>,
        coefficient: Option<f64>,
    ) -> AppResult<Subject> {
        let name = validate_name(pool, name, None)?;
        let color = resolve_color(color.unwrap_or(DEFAULT_SUBJECT_COLOR), SUBJECT_PALETTE)?;
        let coefficient = coefficient.map(validate_coefficient).transpose()?;

        let mut subject = Subject::new(&name, &color, coefficient);
        subject.id = pool.insert(&subject)?;

        write_log(
            &pool.conn,
            "add",
            &format!("subject#{}", subject.id),
            &format!("Added subject '{}'", subject.name),
        )?;

        Ok(subject)
    }

    pub fn edit(pool: &DbPool, key: &str, changes: &SubjectEdit) -> AppResult<Subject> {
        let current = find_subject(pool, key)?;
        let mut patch: Patch = Vec::new();

        if let Some(n) = &changes.name {
            let name = validate_name(pool, n, Some(current.id))?;
            if name != current.name {
                patch.push(("name", text(&name)));
            }
        }
        if let Some(c) = &changes.color {
            let color = resolve_color(c, SUBJECT_PALETTE)?;
            if color != current.color {
                patch.push(("color", text(&color)));
            }
        }
        if let Some(c) = changes.coefficient {
            let coef = validate_coefficient(c)?;
            if current.coefficient != Some(coef) {
                patch.push(("coefficient", Value::Real(coef)));
            }
        }

        if patch.is_empty() {
            return Ok(current);
        }

        pool.update::<Subject>(current.id, &patch)?;

        let updated: Subject = pool.find(current.id)?;
        write_log(
            &pool.conn,
            "edit",
            &format!("subject#{}", updated.id),
            &format!("Edited subject '{}'", updated.name),
        )?;

        Ok(updated)
    }

    /// Delete a subject. Its grades and schedule entries go with it.
    pub fn del(pool: &DbPool, key: &str) -> AppResult<Subject> {
        let subject = find_subject(pool, key)?;
        pool.delete::<Subject>(subject.id)?;

        write_log(
            &pool.conn,
            "del",
            &format!("subject#{}", subject.id),
            &format!("Deleted subject '{}' with its grades and slots", subject.name),
        )?;

        Ok(subject)
    }

    /// Insert the default subject set, unless the owner already has subjects.
    /// Returns how many subjects were created.
    pub fn seed(pool: &DbPool) -> AppResult<usize> {
        if !load_subjects(pool)?.is_empty() {
            return Ok(0);
        }

        let tx = pool.conn.unchecked_transaction()?;
        for (name, color, coefficient) in DEFAULT_SUBJECTS {
            let mut subject = Subject::new(name, color, Some(*coefficient));
            subject.is_default = true;
            pool.insert(&subject)?;
        }
        tx.commit()?;

        write_log(
            &pool.conn,
            "seed",
            "subjects",
            &format!("Seeded {} default subjects", DEFAULT_SUBJECTS.len()),
        )?;

        Ok(DEFAULT_SUBJECTS.len())
    }

    pub fn list(pool: &DbPool, separator: char) -> AppResult<String> {
        let subjects = load_subjects(pool)?;
        let grades = load_grades(pool)?;
        Ok(render_subjects(&subjects, &grades, separator))
    }
}

pub fn render_subjects(subjects: &[Subject], grades: &[Grade], separator: char) -> String {
    if subjects.is_empty() {
        return "No subjects yet. Add one with `subject add` or run `subject seed`.\n".to_string();
    }

    let mut table = Table::new(vec!["ID", "", "Name", "Color", "Coef", "Grades", "Average"]);

    for s in subjects {
        let count = grades.iter().filter(|g| g.subject_id == s.id).count();
        let coef = match s.coefficient {
            Some(c) => format_number(c),
            None => "-".to_string(),
        };
        table.add_row(vec![
            s.id.to_string(),
            paint_block("  ", &s.color),
            s.name.clone(),
            s.color.clone(),
            coef,
            count.to_string(),
            format_average(grades::subject_average(grades, s.id)),
        ]);
    }

    table.render(separator)
}
