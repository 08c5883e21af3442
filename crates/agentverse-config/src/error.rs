//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Invalid substitution pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// One or more validation errors, joined as `path: message`.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
