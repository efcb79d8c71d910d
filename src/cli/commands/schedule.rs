use crate::cli::parser::{Commands, ScheduleAction};
use crate::config::Config;
use crate::core::schedule::ScheduleLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::{day_label, parse_day};
use crate::utils::time::{parse_hour, parse_optional_time, parse_time_arg};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule { action } = cmd {
        let pool = DbPool::new(&cfg.database, &cfg.owner)?;

        match action {
            ScheduleAction::Add {
                subject,
                day,
                start,
                end,
                week,
                recurrence,
            } => {
                let day = parse_day(day)?;
                let start = parse_time_arg(start)?;
                let end = parse_optional_time(end.as_ref())?;

                let (e, s) =
                    ScheduleLogic::add(&pool, subject, day, start, end, *week, *recurrence)?;
                success(format!(
                    "Slot #{} added: {} on {} {}.",
                    e.id,
                    s.name,
                    day_label(e.day),
                    e.time_span()
                ));
            }

            ScheduleAction::Move { id, day, hour } => {
                let day = parse_day(day)?;
                let hour = parse_hour(hour)?;
                let e = ScheduleLogic::move_entry(&pool, *id, day, hour)?;
                success(format!(
                    "Slot #{} moved to {} {}.",
                    e.id,
                    day_label(e.day),
                    e.time_span()
                ));
            }

            ScheduleAction::Del { id } => {
                ScheduleLogic::del(&pool, *id)?;
                success(format!("Slot #{id} deleted."));
            }

            ScheduleAction::Show { week } => {
                let filter = week.unwrap_or_else(|| cfg.week_filter());
                let (first, last) = cfg.grid_hours();
                print!("{}", ScheduleLogic::show(&pool, filter, first, last)?);
            }

            ScheduleAction::List => {
                print!("{}", ScheduleLogic::list(&pool, cfg.separator())?);
            }
        }
    }

    Ok(())
}
