//! Repository sync targets.

use github_client::RepositoryId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::label_set::LabelSet;

#[cfg(test)]
#[path = "repo_sync_tests.rs"]
mod tests;

/// A repository that receives the label set.
///
/// # Example JSON
///
/// ```json
/// {"repo": "my-org/service", "exclude_labels": ["needs-design"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSyncTarget {
    /// Target repository as `owner/name`.
    pub repo: RepositoryId,

    /// Labels left untouched in this repository, whatever their remote state.
    #[serde(default)]
    pub exclude_labels: BTreeSet<String>,
}

impl RepoSyncTarget {
    pub fn new(repo: RepositoryId) -> Self {
        Self {
            repo,
            exclude_labels: BTreeSet::new(),
        }
    }

    pub fn is_excluded(&self, label_name: &str) -> bool {
        self.exclude_labels.contains(label_name)
    }

    /// Exclusions that don't name any declared label.
    pub fn unknown_exclusions<'a>(&'a self, labels: &LabelSet) -> Vec<&'a str> {
        self.exclude_labels
            .iter()
            .filter(|name| !labels.contains(name))
            .map(String::as_str)
            .collect()
    }
}

/// The repository sync document: `{"repo_configs": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSyncConfig {
    pub repo_configs: Vec<RepoSyncTarget>,
}
