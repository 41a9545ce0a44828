use std::path::PathBuf;
use thiserror::Error;

// Only conditions that stop a whole run end up here. Bad match data is handled with defaults,
// skips and notices instead.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("Source directory does not exist: {0}")]
    MissingSourceDir(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;

impl StatsError {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        StatsError::Io { source, path: path.into() }
    }

    pub fn json(source: serde_json::Error, path: impl Into<PathBuf>) -> Self {
        StatsError::Json { source, path: path.into() }
    }
}
