//! Configuration error types.
//!
//! Every failure of the configuration pipeline resolves to exactly one
//! [`ConfigError`] variant, and every variant maps to exactly one
//! [`ErrorCode`]. Callers format the message; this crate only classifies.

use thiserror::Error;

use crate::error_codes::ErrorCode;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors produced while reading and validating `config.toml`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration document is missing or could not be read.
    #[error("Could not read repositories from file '{path}': {reason}")]
    NoInput { path: String, reason: String },

    /// The configuration document is not valid TOML.
    #[error("Failed to parse configuration: {reason}")]
    Parse { reason: String },

    /// One or more required attributes are missing or have the wrong type.
    ///
    /// Each violation names the offending attribute, e.g.
    /// `Config attribute 'main.url' is required`.
    #[error("Invalid configuration: {}", violations.join("; "))]
    InvalidAttribute { violations: Vec<String> },

    /// A URL of a recognized git provider does not have the
    /// `https://<provider>/<account>/<repository>` shape.
    #[error("Repository url '{url}' is not valid")]
    InvalidRepositoryUrl { url: String },

    /// The repository root does not serve a `packagelist`.
    #[error("Repository '{name}' has no packagelist at '{url}'")]
    NoHost { name: String, url: String },

    /// Anything that was not anticipated by the variants above.
    #[error("Unexpected error: {reason}")]
    Software { reason: String },
}

impl ConfigError {
    /// Builds an [`ConfigError::InvalidAttribute`] holding a single violation.
    pub fn invalid_attribute(violation: impl Into<String>) -> Self {
        ConfigError::InvalidAttribute {
            violations: vec![violation.into()],
        }
    }

    /// Returns the exit code this error is reported with.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::NoInput { .. } => ErrorCode::NoInput,
            ConfigError::Parse { .. }
            | ConfigError::InvalidAttribute { .. }
            | ConfigError::InvalidRepositoryUrl { .. } => ErrorCode::Config,
            ConfigError::NoHost { .. } => ErrorCode::NoHost,
            ConfigError::Software { .. } => ErrorCode::Software,
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
