//! Configuration system error types.
//!
//! Domain-specific errors for loading, parsing and validating the label set
//! and repository sync documents.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Configuration system errors.
///
/// Every variant is fatal for a sync run: the CLI reports it and exits
/// without touching any repository.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to access configuration file: {path} - {reason}")]
    FileAccessError { path: String, reason: String },

    /// The file is not well-formed JSON.
    #[error("Invalid JSON in configuration file {path}: {reason}")]
    ParseError { path: String, reason: String },

    /// The file is JSON but doesn't describe a valid document.
    #[error("Invalid configuration in {path}: {field} - {reason}")]
    SchemaError {
        path: String,
        field: String,
        reason: String,
    },
}

impl ConfigurationError {
    /// Creates a schema error for a named field.
    pub fn schema(path: impl Into<String>, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaError {
            path: path.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
