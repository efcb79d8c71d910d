use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::grades::GradeReport;
use crate::core::grades_logic::{GradeLogic, parse_simulation, render_report, render_simulation};
use crate::db::pool::DbPool;
use crate::db::queries::find_subject;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Average { subject, simulate } = cmd {
        let pool = DbPool::new(&cfg.database, &cfg.owner)?;

        match (subject, simulate) {
            (Some(s), Some(raw)) => {
                let sim = parse_simulation(raw, cfg.default_grade_max)?;
                let outcome = GradeLogic::simulate(&pool, s, sim)?;
                print!("{}", render_simulation(&outcome));
            }

            (Some(s), None) => {
                let target = find_subject(&pool, s)?;
                let full = GradeLogic::report(&pool)?;
                let report = GradeReport {
                    subjects: full
                        .subjects
                        .into_iter()
                        .filter(|row| row.subject_id == target.id)
                        .collect(),
                    general: full.general,
                };
                print!("{}", render_report(&report, cfg.separator()));
            }

            _ => {
                let report = GradeLogic::report(&pool)?;
                print!("{}", render_report(&report, cfg.separator()));
            }
        }
    }

    Ok(())
}
