use crate::cli::parser::{Commands, SubjectAction};
use crate::config::Config;
use crate::core::subjects::{SubjectEdit, SubjectLogic};
use crate::db::pool::DbPool;
use crate::db::queries::find_subject;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Subject { action } = cmd {
        let pool = DbPool::new(&cfg.database, &cfg.owner)?;

        match action {
            SubjectAction::Add {
                name,
                color,
                coefficient,
            } => {
                let s = SubjectLogic::add(&pool, name, color.as_deref(), *coefficient)?;
                success(format!("Subject #{} '{}' added ({}).", s.id, s.name, s.color));
            }

            SubjectAction::Edit {
                subject,
                name,
                color,
                coefficient,
            } => {
                let changes = SubjectEdit {
                    name: name.clone(),
                    color: color.clone(),
                    coefficient: *coefficient,
                };
                let s = SubjectLogic::edit(&pool, subject, &changes)?;
                success(format!("Subject #{} '{}' updated.", s.id, s.name));
            }

            SubjectAction::Del { subject, yes } => {
                let target = find_subject(&pool, subject)?;
                if !*yes
                    && !confirm(format!(
                        "Delete subject '{}' with all its grades and timetable slots?",
                        target.name
                    ))?
                {
                    info("Deletion cancelled.");
                    return Ok(());
                }
                let s = SubjectLogic::del(&pool, &target.id.to_string())?;
                success(format!("Subject '{}' deleted.", s.name));
            }

            SubjectAction::List => {
                print!("{}", SubjectLogic::list(&pool, cfg.separator())?);
            }

            SubjectAction::Seed => {
                let n = SubjectLogic::seed(&pool)?;
                if n == 0 {
                    info("Subjects already exist, nothing seeded.");
                } else {
                    success(format!("Created {n} default subjects."));
                }
            }
        }
    }

    Ok(())
}
