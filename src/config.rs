use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{Result, StaffError};

/// Name of the configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "staffdb.toml";

/// Top-level configuration structure parsed from a TOML file.
///
/// Every section and key is optional; missing values take their defaults.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Where the employee database lives.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: PathBuf::from("EmployeeDatabase.db"),
        }
    }
}

/// Logging configuration. `RUST_LOG`, when set, takes precedence over `level`.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// let config = staffdb::config::load_config("staffdb.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| StaffError::Config(format!("{}: {}", path.display(), e)))
}

/// Candidate config files, most specific first.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("staffdb").join("config.toml"));
    }
    candidates
}

/// Loads the first existing file from `candidates`, or the defaults if none exists.
pub fn discover_config(candidates: &[PathBuf]) -> Result<Config> {
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => {
            debug!("Loading configuration from {:?}", path);
            load_config(path)
        }
        None => Ok(Config::default()),
    }
}
