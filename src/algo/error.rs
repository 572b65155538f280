use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlgoError {
    #[error("Invalid difficulty '{0}', must be easy|medium|hard")]
    InvalidDifficulty(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Problem not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("File error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl AlgoError {
    /// Wraps an IO error with the path it happened on.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AlgoError::FileSystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AlgoError>;
