//! Loading of the JSON configuration documents.
//!
//! Failures are classified so the caller can tell a missing file, a file that
//! isn't JSON and a JSON document with the wrong shape apart.

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::{fs, io, path::Path};
use tracing::{debug, error, info, warn};

use crate::errors::{ConfigurationError, ConfigurationResult};
use crate::label_set::LabelSet;
use crate::repo_sync::RepoSyncConfig;

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

/// Both documents a sync run needs, loaded and validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncConfig {
    pub labels: LabelSet,
    pub repos: RepoSyncConfig,
}

/// Loads and validates the label set document.
///
/// # Errors
///
/// - `FileNotFound` if `path` does not exist
/// - `FileAccessError` if it can't be read
/// - `ParseError` if the content is not JSON
/// - `SchemaError` if the `labels` key is missing, a field has the wrong type,
///   or [`LabelSet::validate`] rejects the content
pub fn load_label_set(path: &Path) -> ConfigurationResult<LabelSet> {
    let label_set: LabelSet = load_document(path)?;
    label_set.validate(&path.display().to_string())?;

    info!(
        path = %path.display(),
        label_count = label_set.len(),
        "Loaded label configuration"
    );
    Ok(label_set)
}

/// Loads the repository sync document.
///
/// # Errors
///
/// Same classification as [`load_label_set`]; a `repo` value that isn't
/// `owner/name` is a `SchemaError`.
pub fn load_repo_sync_config(path: &Path) -> ConfigurationResult<RepoSyncConfig> {
    let config: RepoSyncConfig = load_document(path)?;

    info!(
        path = %path.display(),
        repository_count = config.repo_configs.len(),
        "Loaded repository configuration"
    );
    Ok(config)
}

/// Loads both documents and reports exclusions that name undeclared labels.
pub fn load_sync_config(label_config: &Path, repo_config: &Path) -> ConfigurationResult<SyncConfig> {
    let labels = load_label_set(label_config)?;
    let repos = load_repo_sync_config(repo_config)?;

    for target in &repos.repo_configs {
        for name in target.unknown_exclusions(&labels) {
            warn!(
                repo = %target.repo,
                label = name,
                "Excluded label is not declared in the label configuration"
            );
        }
    }

    Ok(SyncConfig { labels, repos })
}

fn load_document<T: DeserializeOwned>(path: &Path) -> ConfigurationResult<T> {
    let path_str = path.display().to_string();
    debug!(path = path_str, "Loading configuration document");

    if !path.exists() {
        error!(path = path_str, "Configuration file does not exist");
        return Err(ConfigurationError::FileNotFound { path: path_str });
    }

    let content = fs::read_to_string(path).map_err(|e| {
        error!(path = path_str, error = %e, "Failed to read configuration file");
        match e.kind() {
            io::ErrorKind::NotFound => ConfigurationError::FileNotFound {
                path: path_str.clone(),
            },
            // Content that isn't UTF-8 can't be JSON.
            io::ErrorKind::InvalidData => ConfigurationError::ParseError {
                path: path_str.clone(),
                reason: e.to_string(),
            },
            _ => ConfigurationError::FileAccessError {
                path: path_str.clone(),
                reason: e.to_string(),
            },
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        error!(path = path_str, error = %e, "Failed to parse configuration file");
        match e.classify() {
            Category::Data => ConfigurationError::SchemaError {
                path: path_str.clone(),
                field: "document".to_string(),
                reason: e.to_string(),
            },
            Category::Syntax | Category::Eof | Category::Io => ConfigurationError::ParseError {
                path: path_str.clone(),
                reason: e.to_string(),
            },
        }
    })
}
