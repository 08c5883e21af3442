//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Run executor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Upper bound for a single step.
    #[serde(default = "default_step_timeout")]
    pub step_timeout_secs: u64,

    /// Upper bound for a whole run; unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_timeout_secs: Option<u64>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            step_timeout_secs: default_step_timeout(),
            run_timeout_secs: None,
        }
    }
}

impl ExecutorConfig {
    pub fn step_timeout(&self) -> Duration {
        Duration::from_secs(self.step_timeout_secs)
    }

    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_secs.map(Duration::from_secs)
    }
}

fn default_step_timeout() -> u64 {
    300
}

/// Storage backends understood by the server.
pub mod storage_backends {
    pub const MEMORY: &str = "memory";
    pub const FILE: &str = "file";
}

/// Definition storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// "memory" or "file".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Root directory for the file backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: None,
        }
    }
}

impl StorageConfig {
    /// Storage directory with `~` expanded, falling back to the user's
    /// data directory.
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => PathBuf::from(shellexpand::tilde(path).as_ref()),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("agentverse"),
        }
    }
}

fn default_backend() -> String {
    storage_backends::MEMORY.to_string()
}

/// Caller identity configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Identity used when a request carries no bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files. Console only when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    pub fn resolved_directory(&self) -> Option<PathBuf> {
        self.directory
            .as_deref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).as_ref()))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
