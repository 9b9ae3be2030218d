//! Label reconciliation across repositories.
//!
//! This module provides the [`LabelSynchronizer`] component that brings the
//! labels of each target repository in line with a declared [`LabelSet`].

use config_manager::{LabelDefinition, LabelSet, RepoSyncConfig, RepoSyncTarget};
use github_client::{LabelClient, LabelPayload, LabelUpdatePayload};
use tracing::{debug, info, warn};

use crate::errors::SyncError;
use crate::plan::{plan_repository, LabelAction};
use crate::report::{LabelOutcome, RepositorySyncResult, SyncReport};

#[cfg(test)]
#[path = "synchronizer_tests.rs"]
mod tests;

/// Progress of a run, reported as each repository starts and finishes.
#[derive(Debug, Clone, Copy)]
pub enum SyncProgress<'a> {
    RepositoryStarted(&'a RepoSyncTarget),
    RepositoryFinished(&'a RepositorySyncResult),
}

/// Synchronizes declared labels into repositories.
///
/// Repositories are processed one at a time and labels one at a time; each
/// API call completes before the next one starts. Failures are recorded in the
/// returned report and never stop the run.
///
/// # Examples
///
/// ```rust,no_run
/// use config_manager::load_sync_config;
/// use github_client::{create_token_client, GitHubClient};
/// use label_sync_core::LabelSynchronizer;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_sync_config(Path::new("labels.json"), Path::new("repos.json"))?;
/// let client = GitHubClient::new(create_token_client("ghp_example", None)?);
///
/// let synchronizer = LabelSynchronizer::new(client);
/// let report = synchronizer.sync(&config.labels, &config.repos).await;
/// println!("Created: {}, Updated: {}", report.created(), report.updated());
/// # Ok(())
/// # }
/// ```
pub struct LabelSynchronizer<C: LabelClient> {
    client: C,
}

impl<C: LabelClient> LabelSynchronizer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Returns the client used for API calls.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Synchronizes the label set into every configured repository.
    pub async fn sync(&self, labels: &LabelSet, repos: &RepoSyncConfig) -> SyncReport {
        self.sync_with_progress(labels, repos, |_| {}).await
    }

    /// Synchronizes the label set into every configured repository, calling
    /// `on_progress` before and after each one.
    ///
    /// Repositories are reported in configuration order, and a repository is
    /// always finished before the next one starts.
    pub async fn sync_with_progress<F>(
        &self,
        labels: &LabelSet,
        repos: &RepoSyncConfig,
        mut on_progress: F,
    ) -> SyncReport
    where
        F: FnMut(SyncProgress<'_>),
    {
        info!(
            label_count = labels.len(),
            repository_count = repos.repo_configs.len(),
            "Starting label synchronization"
        );

        let mut report = SyncReport::new();
        for target in &repos.repo_configs {
            on_progress(SyncProgress::RepositoryStarted(target));
            let result = self.sync_repository(labels, target).await;
            on_progress(SyncProgress::RepositoryFinished(&result));
            report.repositories.push(result);
        }

        info!(
            created = report.created(),
            updated = report.updated(),
            unchanged = report.unchanged(),
            excluded = report.excluded(),
            failed = report.failed(),
            "Label synchronization complete"
        );
        report
    }

    /// Synchronizes the label set into one repository.
    ///
    /// # Behavior
    ///
    /// 1. Fetches the remote labels. If that fails the failure is recorded
    ///    and the repository is treated as having no labels, so every label
    ///    that isn't excluded is created.
    /// 2. Plans an action for each declared label.
    /// 3. Issues one create or update call per mutating action.
    pub async fn sync_repository(
        &self,
        labels: &LabelSet,
        target: &RepoSyncTarget,
    ) -> RepositorySyncResult {
        let repository = target.repo.to_string();
        info!(
            repo = repository,
            label_count = labels.len(),
            excluded_count = target.exclude_labels.len(),
            "Syncing labels to repository"
        );

        let mut result = RepositorySyncResult::new(repository.clone());

        let remote = match self.client.list_labels(&target.repo).await {
            Ok(remote) => remote,
            Err(e) => {
                warn!(
                    repo = repository,
                    error = %e,
                    "Could not fetch existing labels, treating repository as empty"
                );
                result.fetch_error = Some(SyncError::FetchLabels {
                    repository: repository.clone(),
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };
        debug!(
            repo = repository,
            remote_count = remote.len(),
            "Fetched remote labels"
        );

        let plan = plan_repository(labels, target, &remote);
        debug!(
            repo = repository,
            mutations = plan.iter().filter(|p| p.action.is_mutation()).count(),
            "Planned label actions"
        );

        for planned in plan {
            let outcome = self.apply(target, planned.definition, planned.action).await;
            result.record(outcome);
        }

        info!(
            repo = repository,
            created = result.created,
            updated = result.updated,
            unchanged = result.unchanged,
            excluded = result.excluded,
            failed = result.failed,
            "Repository sync complete"
        );
        result
    }

    async fn apply(
        &self,
        target: &RepoSyncTarget,
        definition: &LabelDefinition,
        action: LabelAction,
    ) -> LabelOutcome {
        let repository = target.repo.to_string();
        let name = definition.name.as_str();

        let error = match action {
            LabelAction::Excluded => {
                debug!(repo = repository, name = name, "Skipping excluded label");
                None
            }
            LabelAction::Unchanged => {
                debug!(repo = repository, name = name, "Label unchanged");
                None
            }
            LabelAction::Create => {
                let payload = LabelPayload {
                    name: definition.name.clone(),
                    color: definition.color.clone(),
                    description: definition.description.clone(),
                };
                match self.client.create_label(&target.repo, &payload).await {
                    Ok(_) => {
                        info!(repo = repository, name = name, "Label created");
                        None
                    }
                    Err(e) => {
                        warn!(
                            repo = repository,
                            name = name,
                            error = %e,
                            "Failed to create label"
                        );
                        Some(SyncError::CreateLabel {
                            repository: repository.clone(),
                            label: definition.name.clone(),
                            reason: e.to_string(),
                        })
                    }
                }
            }
            LabelAction::Update => {
                let update = LabelUpdatePayload {
                    color: definition.color.clone(),
                    description: definition.description.clone(),
                };
                match self.client.update_label(&target.repo, name, &update).await {
                    Ok(_) => {
                        info!(repo = repository, name = name, "Label updated");
                        None
                    }
                    Err(e) => {
                        warn!(
                            repo = repository,
                            name = name,
                            error = %e,
                            "Failed to update label"
                        );
                        Some(SyncError::UpdateLabel {
                            repository: repository.clone(),
                            label: definition.name.clone(),
                            reason: e.to_string(),
                        })
                    }
                }
            }
        };

        LabelOutcome {
            label: definition.name.clone(),
            action,
            error,
        }
    }
}
