//! Centralized error types for the scaffolding pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scaffolding operations.
#[derive(Error, Debug)]
pub enum CnaError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Project manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("Project manifest is not a JSON object: {0}")]
    InvalidManifest(PathBuf),

    #[error("Manifest rewrite failed: {0}")]
    ManifestRewrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for scaffolding operations.
pub type CnaResult<T> = Result<T, CnaError>;

impl CnaError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a spawn error for the given program.
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }
}
