//! Errors recorded while reconciling a repository.
//!
//! None of these abort a run. They are collected in the
//! [`RepositorySyncResult`](crate::RepositorySyncResult) of the repository
//! where they happened.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Could not fetch labels from {repository}: {reason}")]
    FetchLabels { repository: String, reason: String },

    #[error("Failed to create label '{label}' in {repository}: {reason}")]
    CreateLabel {
        repository: String,
        label: String,
        reason: String,
    },

    #[error("Failed to update label '{label}' in {repository}: {reason}")]
    UpdateLabel {
        repository: String,
        label: String,
        reason: String,
    },
}
