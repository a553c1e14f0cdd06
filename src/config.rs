//! Analyzer configuration from environment variables and command-line arguments

use crate::analysis_core::DropLevelSource;
use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(var) => write!(f, "Missing value for {}", var),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    pub data_path: PathBuf,
    pub db_path: PathBuf,
    pub output_path: PathBuf,
    pub drop_level_source: DropLevelSource,
}

impl AnalyzerConfig {
    /// Load configuration from the process environment and arguments
    ///
    /// Environment variables:
    /// - `DATA_PATH` (default: data) - overridden by `--data-path <dir>`
    /// - `WAVES_DB_PATH` (default: <DATA_PATH>/game/waves.sqlite3)
    /// - `WAVES_OUTPUT_PATH` (default: <DATA_PATH>/game/waves.json)
    /// - `DROP_LEVEL_SOURCE` (default: enemy) - `enemy` or `drop`
    pub fn from_env() -> Result<Self, ConfigError> {
        let args: Vec<String> = env::args().collect();
        Self::from_lookup(|key| env::var(key).ok(), &args)
    }

    pub fn from_lookup<F>(lookup: F, args: &[String]) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path: PathBuf = match parse_data_path_from_args(args)? {
            Some(path) => path,
            None => lookup("DATA_PATH").unwrap_or_else(|| "data".to_string()).into(),
        };

        let db_path = lookup("WAVES_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_path.join("game").join("waves.sqlite3"));

        let output_path = lookup("WAVES_OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_path.join("game").join("waves.json"));

        let drop_level_source = match lookup("DROP_LEVEL_SOURCE") {
            Some(value) => DropLevelSource::from_str(value.trim()).ok_or_else(|| {
                ConfigError::InvalidValue(format!(
                    "DROP_LEVEL_SOURCE must be 'enemy' or 'drop', got '{}'",
                    value
                ))
            })?,
            None => DropLevelSource::default(),
        };

        Ok(Self {
            data_path,
            db_path,
            output_path,
            drop_level_source,
        })
    }
}

fn parse_data_path_from_args(args: &[String]) -> Result<Option<PathBuf>, ConfigError> {
    match args.iter().position(|x| x == "--data-path") {
        Some(idx) => match args.get(idx + 1) {
            Some(path) if !path.starts_with("--") => Ok(Some(PathBuf::from(path))),
            _ => Err(ConfigError::MissingVariable("--data-path".to_string())),
        },
        None => Ok(None),
    }
}
