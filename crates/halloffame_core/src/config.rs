//! Runtime configuration for embedding callers.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Normalize values once so downstream code sees canonical forms.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - Log levels are one of `trace|debug|info|warn|error` after loading.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::default_log_level;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Environment variable naming the SQLite database file.
pub const ENV_DB_PATH: &str = "HALLOFFAME_DB_PATH";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "HALLOFFAME_LOG_LEVEL";
/// Environment variable naming the absolute log directory.
pub const ENV_LOG_DIR: &str = "HALLOFFAME_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// `None` selects a private in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Loads configuration from `HALLOFFAME_*` variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let value = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());

        let log_level = match value(ENV_LOG_LEVEL) {
            Some(raw) => normalize_level(&raw)?,
            None => default_log_level(),
        };
        let log_dir = match value(ENV_LOG_DIR) {
            Some(raw) => Some(normalize_log_dir(&raw)?),
            None => None,
        };

        Ok(Self {
            db_path: value(ENV_DB_PATH).map(|raw| PathBuf::from(raw.trim())),
            log_level,
            log_dir,
        })
    }

    /// Opens the configured database with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

/// Maps a user-supplied level onto its canonical name.
pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

/// Requires a non-empty absolute directory path.
pub fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{normalize_level, CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn reads_and_normalizes_values() {
        let log_dir = std::env::temp_dir().join("halloffame-config-test");
        let log_dir_text = log_dir.to_str().unwrap().to_string();
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, " people.db "),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, log_dir_text.as_str()),
        ]))
        .unwrap();

        assert_eq!(config.db_path, Some(PathBuf::from("people.db")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn blank_values_are_unset() {
        let config =
            CoreConfig::from_lookup(lookup(&[(ENV_DB_PATH, "  "), (ENV_LOG_DIR, "")])).unwrap();
        assert!(config.db_path.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn rejects_unknown_level_and_relative_dir() {
        assert!(normalize_level("loud").unwrap_err().contains("unsupported"));
        let err = CoreConfig::from_lookup(lookup(&[(ENV_LOG_DIR, "logs/dev")])).unwrap_err();
        assert!(err.contains("absolute"));
    }

    #[test]
    fn in_memory_database_opens_when_no_path_configured() {
        let conn = CoreConfig::default().open_db().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM persons;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
