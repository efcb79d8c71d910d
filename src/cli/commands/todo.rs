use crate::cli::parser::{Commands, TodoAction};
use crate::config::Config;
use crate::core::todos::{TodoEdit, TodoLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::{parse_date_arg, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Todo { action } = cmd {
        let pool = DbPool::new(&cfg.database, &cfg.owner)?;

        match action {
            TodoAction::Add {
                title,
                priority,
                due,
            } => {
                let due = due.as_deref().map(parse_date_arg).transpose()?;
                let t = TodoLogic::add(&pool, title, *priority, due)?;
                success(format!("Todo #{} added: {}", t.id, t.title));
            }

            TodoAction::Done { id } => {
                let t = TodoLogic::toggle(&pool, *id)?;
                if t.completed {
                    success(format!("Todo #{} done.", t.id));
                } else {
                    success(format!("Todo #{} reopened.", t.id));
                }
            }

            TodoAction::Edit {
                id,
                title,
                bold,
                italic,
                underline,
                highlight,
                no_highlight,
            } => {
                let highlight = match (highlight, no_highlight) {
                    (Some(c), _) => Some(Some(c.clone())),
                    (None, true) => Some(None),
                    (None, false) => None,
                };
                let changes = TodoEdit {
                    title: title.clone(),
                    toggle_bold: *bold,
                    toggle_italic: *italic,
                    toggle_underline: *underline,
                    highlight,
                };
                let t = TodoLogic::edit(&pool, *id, &changes)?;
                success(format!("Todo #{} updated: {}", t.id, t.title));
            }

            TodoAction::Del { id } => {
                TodoLogic::del(&pool, *id)?;
                success(format!("Todo #{id} deleted."));
            }

            TodoAction::List { all } => {
                print!(
                    "{}",
                    TodoLogic::list(&pool, *all, today(), cfg.due_soon_days, cfg.separator())?
                );
            }
        }
    }

    Ok(())
}
