use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::subjects::SubjectLogic;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all migrations
///  - the default subjects, unless `--empty` or `seed_defaults: false`
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Init { empty } = &cli.command {
        let created = Config::init_all(cli.db.clone(), cli.test)?;
        let db_path = created.database;

        println!("⚙️  Initializing echampo…");
        if !cli.test {
            println!("📄 Config file : {}", Config::config_file().display());
        }
        println!("🗄️  Database   : {}", &db_path);

        let pool = DbPool::new(&db_path, &cfg.owner)?;
        success(format!("Database initialized at {}", &db_path));

        if let Err(e) = write_log(
            &pool.conn,
            "init",
            "database",
            &format!("Database initialized at {}", &db_path),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        if !*empty && cfg.seed_defaults {
            let n = SubjectLogic::seed(&pool)?;
            if n > 0 {
                success(format!("Created {n} default subjects."));
            }
        }

        println!("🎉 echampo initialization completed!");
    }

    Ok(())
}
