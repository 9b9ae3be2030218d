//! Repository domain types.
//!
//! This module contains the identifier used to address a repository in the
//! label endpoints.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::Error;

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Validated `owner/name` repository identifier.
///
/// # Validation Rules
/// - Exactly one `/` separating owner and name
/// - Neither part may be empty
/// - Characters: alphanumeric, hyphens, underscores, periods
///
/// # Examples
///
/// ```rust
/// use github_client::RepositoryId;
///
/// let repo: RepositoryId = "octocat/hello-world".parse().unwrap();
/// assert_eq!(repo.owner(), "octocat");
/// assert_eq!(repo.name(), "hello-world");
/// assert_eq!(repo.to_string(), "octocat/hello-world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryId {
    owner: String,
    name: String,
}

impl RepositoryId {
    /// Creates an identifier from its two parts.
    ///
    /// # Errors
    /// Returns `Error::InvalidRepository` if either part is empty or contains
    /// characters GitHub doesn't allow.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, Error> {
        let owner = owner.into();
        let name = name.into();

        if !is_valid_segment(&owner) || !is_valid_segment(&name) {
            return Err(Error::InvalidRepository(format!("{}/{}", owner, name)));
        }

        Ok(Self { owner, name })
    }

    /// The user or organization that owns the repository
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name without the owner
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

impl FromStr for RepositoryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) => {
                Self::new(owner, name).map_err(|_| Error::InvalidRepository(s.to_string()))
            }
            None => Err(Error::InvalidRepository(s.to_string())),
        }
    }
}

impl TryFrom<String> for RepositoryId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepositoryId> for String {
    fn from(value: RepositoryId) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
