use crate::errors::{AppError, AppResult};
use crate::models::WeekFilter;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub mod migrate;

pub const APP_NAME: &str = "echampo";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_week_filter")]
    pub default_week_filter: String,
    #[serde(default = "default_first_hour")]
    pub first_hour: u32,
    #[serde(default = "default_last_hour")]
    pub last_hour: u32,
    #[serde(default = "default_grade_max")]
    pub default_grade_max: f64,
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_seed_defaults")]
    pub seed_defaults: bool,
}

fn default_owner() -> String {
    "local".to_string()
}
fn default_week_filter() -> String {
    "all".to_string()
}
fn default_first_hour() -> u32 {
    crate::core::timetable::DEFAULT_FIRST_HOUR
}
fn default_last_hour() -> u32 {
    crate::core::timetable::DEFAULT_LAST_HOUR
}
fn default_grade_max() -> f64 {
    crate::core::grades::GRADE_SCALE
}
fn default_due_soon_days() -> i64 {
    3
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_seed_defaults() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            owner: default_owner(),
            default_week_filter: default_week_filter(),
            first_hour: default_first_hour(),
            last_hour: default_last_hour(),
            default_grade_max: default_grade_max(),
            due_soon_days: default_due_soon_days(),
            separator_char: default_separator_char(),
            seed_defaults: default_seed_defaults(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join(APP_NAME)
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(format!(".{APP_NAME}"))
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(format!("{APP_NAME}.conf"))
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(format!("{APP_NAME}.sqlite"))
    }

    /// Where a `--db` value points: `~` is expanded, relative names live in
    /// the config directory.
    pub fn resolve_db_path(raw: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(raw);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Week filter used by `schedule show` when none is given.
    pub fn week_filter(&self) -> WeekFilter {
        WeekFilter::from_config_str(&self.default_week_filter).unwrap_or(WeekFilter::All)
    }

    /// Hours rendered by the timetable grid, normalized so that
    /// `first <= last <= 23`.
    pub fn grid_hours(&self) -> (u32, u32) {
        let last = self.last_hour.min(23);
        let first = self.first_hour.min(last);
        (first, last)
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Create the config directory and file, and resolve the database path.
    ///
    /// In test mode the config file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            fs::write(Self::config_file(), migrate::annotate(&yaml))?;
            crate::ui::messages::success(format!(
                "Config file: {}",
                Self::config_file().display()
            ));
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
