//! Tests for the label synchronizer.

use super::*;
use async_trait::async_trait;
use github_client::{Error, Label, RepositoryId};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing_test::traced_test;

/// A call received by the mock client.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    List(String),
    Create(String, LabelPayload),
    Update(String, String, LabelUpdatePayload),
}

/// Mock label client that records calls and keeps an in-memory label store.
///
/// Successful creates and updates change the store, so a second sync sees
/// the result of the first one.
#[derive(Default)]
struct MockLabelClient {
    remote: Mutex<HashMap<String, Vec<Label>>>,
    calls: Mutex<Vec<Call>>,
    failing_lists: HashSet<String>,
    failing_labels: HashSet<String>,
}

impl MockLabelClient {
    fn new() -> Self {
        Self::default()
    }

    fn with_remote(self, repo: &str, labels: Vec<Label>) -> Self {
        self.remote
            .lock()
            .unwrap()
            .insert(repo.to_string(), labels);
        self
    }

    fn failing_list(mut self, repo: &str) -> Self {
        self.failing_lists.insert(repo.to_string());
        self
    }

    fn failing_label(mut self, name: &str) -> Self {
        self.failing_labels.insert(name.to_string());
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List(_)))
            .collect()
    }

    fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn remote_label(&self, repo: &str, name: &str) -> Option<Label> {
        self.remote
            .lock()
            .unwrap()
            .get(repo)
            .and_then(|labels| labels.iter().find(|l| l.name == name).cloned())
    }
}

#[async_trait]
impl LabelClient for MockLabelClient {
    async fn authenticated_user(&self) -> Result<String, Error> {
        Ok("octocat".to_string())
    }

    async fn list_labels(&self, repo: &RepositoryId) -> Result<Vec<Label>, Error> {
        let key = repo.to_string();
        self.calls.lock().unwrap().push(Call::List(key.clone()));

        if self.failing_lists.contains(&key) {
            return Err(Error::NotFound);
        }
        Ok(self
            .remote
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_label(
        &self,
        repo: &RepositoryId,
        label: &LabelPayload,
    ) -> Result<Label, Error> {
        let key = repo.to_string();
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(key.clone(), label.clone()));

        if self.failing_labels.contains(&label.name) {
            return Err(Error::ApiError {
                status: 422,
                message: "Validation Failed".to_string(),
            });
        }

        let created = Label {
            name: label.name.clone(),
            color: label.color.clone(),
            description: label.description.clone(),
        };
        self.remote
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update_label(
        &self,
        repo: &RepositoryId,
        name: &str,
        update: &LabelUpdatePayload,
    ) -> Result<Label, Error> {
        let key = repo.to_string();
        self.calls.lock().unwrap().push(Call::Update(
            key.clone(),
            name.to_string(),
            update.clone(),
        ));

        if self.failing_labels.contains(name) {
            return Err(Error::RateLimitExceeded);
        }

        let mut remote = self.remote.lock().unwrap();
        let label = remote
            .get_mut(&key)
            .and_then(|labels| labels.iter_mut().find(|l| l.name == name))
            .ok_or(Error::NotFound)?;
        label.color = update.color.clone();
        label.description = update.description.clone();
        Ok(label.clone())
    }
}

fn remote(name: &str, color: &str, description: &str) -> Label {
    Label {
        name: name.to_string(),
        color: color.to_string(),
        description: description.to_string(),
    }
}

fn bug_labels() -> LabelSet {
    LabelSet {
        labels: vec![LabelDefinition {
            name: "bug".to_string(),
            color: "ff0000".to_string(),
            description: "Bug report".to_string(),
        }],
    }
}

fn target(repo: &str, exclusions: &[&str]) -> RepoSyncTarget {
    let mut target = RepoSyncTarget::new(repo.parse().unwrap());
    target
        .exclude_labels
        .extend(exclusions.iter().map(|s| s.to_string()));
    target
}

fn repos(targets: Vec<RepoSyncTarget>) -> RepoSyncConfig {
    RepoSyncConfig {
        repo_configs: targets,
    }
}

#[tokio::test]
async fn test_absent_label_is_created_once() {
    let client = MockLabelClient::new();
    let synchronizer = LabelSynchronizer::new(client);

    let result = synchronizer
        .sync_repository(&bug_labels(), &target("org/repo1", &[]))
        .await;

    assert_eq!(result.created, 1);
    assert!(result.is_success());
    assert_eq!(
        synchronizer.client().mutations(),
        vec![Call::Create(
            "org/repo1".to_string(),
            LabelPayload {
                name: "bug".to_string(),
                color: "ff0000".to_string(),
                description: "Bug report".to_string(),
            }
        )]
    );
}

#[tokio::test]
async fn test_matching_label_is_left_alone() {
    let client =
        MockLabelClient::new().with_remote("org/repo1", vec![remote("bug", "ff0000", "Bug report")]);
    let synchronizer = LabelSynchronizer::new(client);

    let result = synchronizer
        .sync_repository(&bug_labels(), &target("org/repo1", &[]))
        .await;

    assert_eq!(result.unchanged, 1);
    assert!(!result.has_changes());
    assert!(synchronizer.client().mutations().is_empty());
}

#[tokio::test]
async fn test_changed_color_is_updated() {
    let client =
        MockLabelClient::new().with_remote("org/repo1", vec![remote("bug", "00ff00", "Bug report")]);
    let synchronizer = LabelSynchronizer::new(client);

    let result = synchronizer
        .sync_repository(&bug_labels(), &target("org/repo1", &[]))
        .await;

    assert_eq!(result.updated, 1);
    assert_eq!(
        synchronizer.client().mutations(),
        vec![Call::Update(
            "org/repo1".to_string(),
            "bug".to_string(),
            LabelUpdatePayload {
                color: "ff0000".to_string(),
                description: "Bug report".to_string(),
            }
        )]
    );
    assert_eq!(
        synchronizer
            .client()
            .remote_label("org/repo1", "bug")
            .map(|l| l.color),
        Some("ff0000".to_string())
    );
}

#[tokio::test]
async fn test_excluded_label_is_never_touched() {
    let labels = bug_labels();

    for existing in [None, Some(remote("bug", "00ff00", "Old description"))] {
        let client = match existing {
            Some(label) => MockLabelClient::new().with_remote("org/repo1", vec![label]),
            None => MockLabelClient::new(),
        };
        let synchronizer = LabelSynchronizer::new(client);

        let result = synchronizer
            .sync_repository(&labels, &target("org/repo1", &["bug"]))
            .await;

        assert_eq!(result.excluded, 1);
        assert!(synchronizer.client().mutations().is_empty());
    }
}

#[tokio::test]
async fn test_defaults_are_used_for_create() {
    let labels = LabelSet {
        labels: vec![LabelDefinition::named("triage")],
    };
    let synchronizer = LabelSynchronizer::new(MockLabelClient::new());

    synchronizer
        .sync_repository(&labels, &target("org/repo1", &[]))
        .await;

    assert_eq!(
        synchronizer.client().mutations(),
        vec![Call::Create(
            "org/repo1".to_string(),
            LabelPayload {
                name: "triage".to_string(),
                color: "ededed".to_string(),
                description: String::new(),
            }
        )]
    );
}

#[tokio::test]
async fn test_unmanaged_remote_labels_are_kept() {
    let client = MockLabelClient::new().with_remote(
        "org/repo1",
        vec![
            remote("bug", "ff0000", "Bug report"),
            remote("wontfix", "ffffff", "Not managed here"),
        ],
    );
    let synchronizer = LabelSynchronizer::new(client);

    synchronizer
        .sync_repository(&bug_labels(), &target("org/repo1", &[]))
        .await;

    assert!(synchronizer.client().mutations().is_empty());
    assert!(synchronizer
        .client()
        .remote_label("org/repo1", "wontfix")
        .is_some());
}

#[tokio::test]
#[traced_test]
async fn test_fetch_failure_creates_every_label_not_excluded() {
    let labels = LabelSet {
        labels: vec![
            LabelDefinition::named("bug"),
            LabelDefinition::named("docs"),
            LabelDefinition::named("skip-me"),
        ],
    };
    let client = MockLabelClient::new().failing_list("org/repo1");
    let synchronizer = LabelSynchronizer::new(client);

    let result = synchronizer
        .sync_repository(&labels, &target("org/repo1", &["skip-me"]))
        .await;

    assert!(result.remote_fetch_failed());
    assert!(!result.is_success());
    assert_eq!(result.created, 2);
    assert_eq!(result.excluded, 1);
    let created: Vec<String> = synchronizer
        .client()
        .mutations()
        .into_iter()
        .filter_map(|c| match c {
            Call::Create(_, payload) => Some(payload.name),
            _ => None,
        })
        .collect();
    assert_eq!(created, vec!["bug".to_string(), "docs".to_string()]);
    assert!(logs_contain("Could not fetch existing labels"));
}

#[tokio::test]
#[traced_test]
async fn test_label_failure_does_not_stop_the_repository() {
    let labels = LabelSet {
        labels: vec![
            LabelDefinition::named("broken"),
            LabelDefinition::named("fine"),
        ],
    };
    let client = MockLabelClient::new().failing_label("broken");
    let synchronizer = LabelSynchronizer::new(client);

    let result = synchronizer
        .sync_repository(&labels, &target("org/repo1", &[]))
        .await;

    assert_eq!(result.failed, 1);
    assert_eq!(result.created, 1);
    assert_eq!(result.failed_labels, vec!["broken".to_string()]);
    assert!(matches!(
        result.outcomes[0].error,
        Some(SyncError::CreateLabel { .. })
    ));
    assert!(logs_contain("Failed to create label"));
}

#[tokio::test]
async fn test_update_failure_is_recorded() {
    let client = MockLabelClient::new()
        .with_remote("org/repo1", vec![remote("bug", "000000", "")])
        .failing_label("bug");
    let synchronizer = LabelSynchronizer::new(client);

    let result = synchronizer
        .sync_repository(&bug_labels(), &target("org/repo1", &[]))
        .await;

    assert_eq!(result.failed, 1);
    assert_eq!(result.updated, 0);
    assert_eq!(
        result.outcomes[0].error,
        Some(SyncError::UpdateLabel {
            repository: "org/repo1".to_string(),
            label: "bug".to_string(),
            reason: "Rate limit exceeded".to_string(),
        })
    );
}

#[tokio::test]
async fn test_sync_processes_every_repository_in_order() {
    let client = MockLabelClient::new()
        .failing_list("org/missing")
        .with_remote("org/repo2", vec![remote("bug", "ff0000", "Bug report")]);
    let synchronizer = LabelSynchronizer::new(client);
    let config = repos(vec![
        target("org/repo1", &[]),
        target("org/missing", &[]),
        target("org/repo2", &[]),
    ]);

    let report = synchronizer.sync(&bug_labels(), &config).await;

    let names: Vec<&str> = report
        .repositories
        .iter()
        .map(|r| r.repository.as_str())
        .collect();
    assert_eq!(names, vec!["org/repo1", "org/missing", "org/repo2"]);
    assert_eq!(report.created(), 2);
    assert_eq!(report.unchanged(), 1);
    assert_eq!(report.fetch_failures(), 1);
    assert!(!report.is_success());

    let lists: Vec<Call> = synchronizer
        .client()
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::List(_)))
        .collect();
    assert_eq!(lists.len(), 3);
}

#[tokio::test]
async fn test_sync_with_progress_reports_each_repository_around_its_calls() {
    let client = MockLabelClient::new().failing_list("org/missing");
    let synchronizer = LabelSynchronizer::new(client);
    let config = repos(vec![target("org/repo1", &[]), target("org/missing", &[])]);

    let mut events = Vec::new();
    let report = synchronizer
        .sync_with_progress(&bug_labels(), &config, |progress| match progress {
            SyncProgress::RepositoryStarted(target) => {
                let calls = synchronizer.client().calls().len();
                events.push(format!("start {} after {} calls", target.repo, calls));
            }
            SyncProgress::RepositoryFinished(result) => {
                events.push(format!(
                    "finish {} failed={}",
                    result.repository,
                    result.remote_fetch_failed()
                ));
            }
        })
        .await;

    assert_eq!(
        events,
        vec![
            "start org/repo1 after 0 calls",
            "finish org/repo1 failed=false",
            "start org/missing after 2 calls",
            "finish org/missing failed=true",
        ]
    );
    assert_eq!(report.repositories.len(), 2);
}

#[tokio::test]
#[traced_test]
async fn test_planned_mutations_are_logged() {
    let client = MockLabelClient::new().with_remote(
        "org/repo1",
        vec![remote("docs", "0075ca", "")],
    );
    let synchronizer = LabelSynchronizer::new(client);
    let labels = LabelSet {
        labels: vec![
            LabelDefinition::named("bug"),
            LabelDefinition {
                name: "docs".to_string(),
                color: "0075ca".to_string(),
                description: String::new(),
            },
        ],
    };

    synchronizer
        .sync_repository(&labels, &target("org/repo1", &[]))
        .await;

    assert!(logs_contain("Planned label actions"));
    assert!(logs_contain("mutations=1"));
}

#[tokio::test]
async fn test_second_sync_makes_no_changes() {
    let labels = LabelSet {
        labels: vec![
            LabelDefinition {
                name: "bug".to_string(),
                color: "d73a4a".to_string(),
                description: "Something isn't working".to_string(),
            },
            LabelDefinition::named("good first issue"),
        ],
    };
    let client = MockLabelClient::new().with_remote(
        "org/repo1",
        vec![remote("bug", "000000", "Something isn't working")],
    );
    let synchronizer = LabelSynchronizer::new(client);
    let config = repos(vec![target("org/repo1", &[]), target("org/repo2", &[])]);

    let first = synchronizer.sync(&labels, &config).await;
    assert!(first.has_changes());

    synchronizer.client().clear_calls();
    let second = synchronizer.sync(&labels, &config).await;

    assert!(synchronizer.client().mutations().is_empty());
    assert!(!second.has_changes());
    assert_eq!(second.unchanged(), 4);
}

#[tokio::test]
async fn test_empty_repo_config_makes_no_calls() {
    let synchronizer = LabelSynchronizer::new(MockLabelClient::new());

    let report = synchronizer
        .sync(&bug_labels(), &RepoSyncConfig::default())
        .await;

    assert!(report.repositories.is_empty());
    assert!(report.is_success());
    assert!(synchronizer.client().calls().is_empty());
}
