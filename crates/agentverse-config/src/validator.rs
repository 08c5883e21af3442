//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, storage_backends};

/// Longest step timeout accepted without a warning.
const LONG_STEP_TIMEOUT_SECS: u64 = 3600;

/// Longest run timeout accepted at all (one year).
const MAX_RUN_TIMEOUT_SECS: u64 = 365 * 24 * 3600;

/// Longest run timeout accepted without a warning.
const LONG_RUN_TIMEOUT_SECS: u64 = 24 * 3600;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Fold all errors into one [`ConfigError::Invalid`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.is_valid() {
            return Ok(self.warnings);
        }
        let details: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect();
        Err(ConfigError::Invalid(details.join("; ")))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_executor(config, &mut result);
        Self::validate_storage(config, &mut result);
        Self::validate_auth(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }

        for origin in &config.server.cors_origins {
            if origin != "*" && !origin.starts_with("http://") && !origin.starts_with("https://")
            {
                result.add_error(ValidationError::new(
                    "server.cors_origins",
                    format!("Invalid origin '{}': must start with http:// or https://", origin),
                ));
            }
        }
    }

    fn validate_executor(config: &Config, result: &mut ValidationResult) {
        let executor = &config.executor;

        if executor.step_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "executor.step_timeout_secs",
                "step_timeout_secs must be greater than 0",
            ));
        } else if executor.step_timeout_secs > LONG_STEP_TIMEOUT_SECS {
            result.add_warning(ValidationWarning::new(
                "executor.step_timeout_secs",
                "step_timeout_secs is very high (>3600), a stuck provider will hold the run",
            ));
        }

        match executor.run_timeout_secs {
            Some(0) => result.add_error(ValidationError::new(
                "executor.run_timeout_secs",
                "run_timeout_secs must be greater than 0 when set",
            )),
            Some(secs) if secs > MAX_RUN_TIMEOUT_SECS => result.add_error(ValidationError::new(
                "executor.run_timeout_secs",
                format!("run_timeout_secs cannot exceed {}", MAX_RUN_TIMEOUT_SECS),
            )),
            Some(secs) if secs > LONG_RUN_TIMEOUT_SECS => {
                result.add_warning(ValidationWarning::new(
                    "executor.run_timeout_secs",
                    "run_timeout_secs is very high (>86400)",
                ))
            }
            _ => {}
        }
    }

    fn validate_storage(config: &Config, result: &mut ValidationResult) {
        let backend = config.storage.backend.as_str();
        if backend != storage_backends::MEMORY && backend != storage_backends::FILE {
            result.add_error(ValidationError::new(
                "storage.backend",
                format!("Unknown storage backend '{}': expected memory or file", backend),
            ));
        }

        if backend == storage_backends::MEMORY && config.storage.path.is_some() {
            result.add_warning(ValidationWarning::new(
                "storage.path",
                "path is ignored by the memory backend",
            ));
        }
    }

    fn validate_auth(config: &Config, result: &mut ValidationResult) {
        match config.auth.default_user.as_deref() {
            Some("") => result.add_error(ValidationError::new(
                "auth.default_user",
                "default_user cannot be empty",
            )),
            Some(_) => result.add_warning(ValidationWarning::new(
                "auth.default_user",
                "Requests without a bearer token run as the default user",
            )),
            None => {}
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "'{}' is not a plain level, it will be used as a filter directive",
                    config.logging.level
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
