// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupercatError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Required input not found: {0}")]
    MissingInput(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SupercatError>;

// Allow `?` on std::io::Error by converting to SupercatError::Io with unknown path.
impl From<std::io::Error> for SupercatError {
    fn from(source: std::io::Error) -> Self {
        SupercatError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl SupercatError {
    /// Wraps an I/O error with the path it concerns.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        SupercatError::Io {
            source,
            path: path.into(),
        }
    }
}
