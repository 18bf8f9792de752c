//! Centralized error types for stackgen.

use thiserror::Error;

/// Main error type for stackgen operations.
#[derive(Error, Debug)]
pub enum StackgenError {
    #[error("Invalid project name '{0}': no alphanumeric characters to derive a class name from")]
    InvalidName(String),

    #[error("Job '{job}' needs '{dependency}', which is not defined in the workflow")]
    UnknownJobDependency { job: String, dependency: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type for stackgen operations.
pub type StackgenResult<T> = Result<T, StackgenError>;

impl StackgenError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
