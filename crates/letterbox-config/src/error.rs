//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file does not exist
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid YAML for the expected shape
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Required environment variable is unset or empty
    #[error("Required environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// Config parsed but failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
