pub mod analysis_core;
pub mod config;
pub mod sqlite_pragma;

pub use analysis_core::{AnalysisError, CorpusDriver, RunStats};
pub use config::{AnalyzerConfig, ConfigError};
