use config_manager::ConfigurationError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that abort a `label-sync` run.
///
/// Every variant is fatal and ends the process with exit code 1. Failures of
/// individual label operations are not errors at this level; they are part
/// of the sync report.
#[derive(Error, Debug)]
pub enum Error {
    /// No usable GitHub client could be set up.
    ///
    /// This error is returned when no token is found in the environment or
    /// the keyring, or when the client can't be built from the token.
    #[error("GitHub client unavailable: {0}")]
    ClientUnavailable(String),

    /// The GitHub client is not authenticated.
    ///
    /// This error is returned when the authentication-status check fails,
    /// such as invalid tokens, expired credentials, or network issues during auth.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A configuration document is missing, isn't JSON or has the wrong shape.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
