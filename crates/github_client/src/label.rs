//! Label domain types.
//!
//! This module contains the label records exchanged with the GitHub label API.

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;

/// A label as it currently exists in a repository.
///
/// GitHub returns a `null` description for labels that never had one; it is
/// read as the empty string so that it compares equal to an undeclared
/// description.
///
/// # Examples
///
/// ```
/// use github_client::Label;
///
/// let label = Label {
///     name: "bug".to_string(),
///     color: "d73a4a".to_string(),
///     description: "Something isn't working".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,

    /// Hex color without the leading `#`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub color: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Request body for `POST /repos/{owner}/{repo}/labels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelPayload {
    pub name: String,
    pub color: String,
    pub description: String,
}

/// Request body for `PATCH /repos/{owner}/{repo}/labels/{name}`.
///
/// The label name travels in the URL, so it is not part of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelUpdatePayload {
    pub color: String,
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
