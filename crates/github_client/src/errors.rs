//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when talking to the GitHub
//! label API through the github_client crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// Each variant carries enough context to be logged as a warning by callers that
/// treat API failures as non-fatal.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{Error, LabelClient};
///
/// match client.list_labels(&repo).await {
///     Ok(labels) => println!("Found {} labels", labels.len()),
///     Err(Error::NotFound) => eprintln!("Repository does not exist or is not visible"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub rejected a request with a non-success status.
    ///
    /// Covers validation failures (422), permission problems (403) and any other
    /// status code that doesn't have a dedicated variant.
    #[error("GitHub API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - The token is invalid, expired or revoked (401)
    /// - The client could not be built from the provided credentials
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A repository identifier was not of the form `owner/name`.
    #[error("Invalid repository identifier '{0}': expected 'owner/name'")]
    InvalidRepository(String),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// GitHub also answers 404 for private repositories the token cannot see.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The request never produced a GitHub response (connection, TLS, URI problems).
    #[error("Failed to communicate with GitHub: {0}")]
    Transport(String),
}
