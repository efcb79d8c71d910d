//! Configuration file upgrades: detect and add fields introduced by newer
//! versions, keeping the values the user already set.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Comment lines injected after the key they document.
const FIELD_DOCS: &[(&str, &str)] = &[
    (
        "default_week_filter:",
        "  # default_week_filter options:\n\
         #   all   → every entry\n\
         #   week1 → entries for both weeks and week 1\n\
         #   week2 → entries for both weeks and week 2\n",
    ),
    (
        "due_soon_days:",
        "  # todos due within this many days are flagged as due soon\n",
    ),
];

fn defaults_mapping() -> AppResult<Mapping> {
    let value = serde_yaml::to_value(Config::default())?;
    match value {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// Keys known to this version that the file at `path` does not set.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = defaults_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value. Returns the added keys.
pub fn migrate_config(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let defaults = defaults_mapping()?;
    let mut added = Vec::new();

    for (key, value) in defaults {
        if !current.contains_key(&key) {
            if let Some(name) = key.as_str() {
                added.push(name.to_string());
            }
            current.insert(key, value);
        }
    }

    if !added.is_empty() {
        let yaml = serde_yaml::to_string(&Value::Mapping(current))?;
        fs::write(path, annotate(&yaml))?;
    }

    Ok(added)
}

/// Inject documentation comments below the keys listed in `FIELD_DOCS`.
pub fn annotate(yaml: &str) -> String {
    let mut out = String::new();

    for line in yaml.lines() {
        out.push_str(line);
        out.push('\n');

        if let Some((_, doc)) = FIELD_DOCS.iter().find(|(key, _)| line.starts_with(key)) {
            out.push_str(doc);
        }
    }

    out
}
