use crate::cli::parser::{Commands, GradeAction};
use crate::config::Config;
use crate::core::grades::subject_average;
use crate::core::grades_logic::GradeLogic;
use crate::db::pool::DbPool;
use crate::db::queries::load_grades_for_subject;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::{parse_date_arg, today};
use crate::utils::formatting::{format_average, format_number};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Grade { action } = cmd {
        let pool = DbPool::new(&cfg.database, &cfg.owner)?;

        match action {
            GradeAction::Add {
                subject,
                value,
                max,
                coefficient,
                description,
                date,
            } => {
                let date = match date {
                    Some(d) => parse_date_arg(d)?,
                    None => today(),
                };
                let max = max.unwrap_or(cfg.default_grade_max);

                let (g, s) = GradeLogic::add(
                    &pool,
                    subject,
                    *value,
                    max,
                    *coefficient,
                    description.clone(),
                    date,
                )?;

                let avg = subject_average(&load_grades_for_subject(&pool, s.id)?, s.id);
                success(format!(
                    "Grade #{} added: {}/{} in {} (average {}).",
                    g.id,
                    format_number(g.value),
                    format_number(g.max),
                    s.name,
                    format_average(avg)
                ));
            }

            GradeAction::Del { id } => {
                GradeLogic::del(&pool, *id)?;
                success(format!("Grade #{id} deleted."));
            }

            GradeAction::List { subject } => {
                print!(
                    "{}",
                    GradeLogic::list(&pool, subject.as_deref(), cfg.separator())?
                );
            }
        }
    }

    Ok(())
}
