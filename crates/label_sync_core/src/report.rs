//! Results of a sync run.

use crate::errors::SyncError;
use crate::plan::LabelAction;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// What happened to one declared label in one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOutcome {
    pub label: String,
    pub action: LabelAction,
    /// Set when the create or update call failed.
    pub error: Option<SyncError>,
}

impl LabelOutcome {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Result of reconciling one repository.
///
/// Contains counters for the different outcomes of label operations and the
/// per-label outcomes in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySyncResult {
    /// The repository as `owner/name`
    pub repository: String,

    /// Number of labels created
    pub created: usize,

    /// Number of labels updated
    pub updated: usize,

    /// Number of labels that already existed with correct configuration
    pub unchanged: usize,

    /// Number of labels skipped because the repository excludes them
    pub excluded: usize,

    /// Number of create or update calls that failed
    pub failed: usize,

    /// Names of labels that failed (for error reporting)
    pub failed_labels: Vec<String>,

    /// Set when the remote labels could not be fetched and were treated as empty
    pub fetch_error: Option<SyncError>,

    pub outcomes: Vec<LabelOutcome>,
}

impl RepositorySyncResult {
    /// Creates a new empty result.
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            created: 0,
            updated: 0,
            unchanged: 0,
            excluded: 0,
            failed: 0,
            failed_labels: Vec::new(),
            fetch_error: None,
            outcomes: Vec::new(),
        }
    }

    /// Records the outcome of one label and updates the counters.
    pub fn record(&mut self, outcome: LabelOutcome) {
        if outcome.is_failure() {
            self.failed += 1;
            self.failed_labels.push(outcome.label.clone());
        } else {
            match outcome.action {
                LabelAction::Create => self.created += 1,
                LabelAction::Update => self.updated += 1,
                LabelAction::Unchanged => self.unchanged += 1,
                LabelAction::Excluded => self.excluded += 1,
            }
        }
        self.outcomes.push(outcome);
    }

    /// Returns true if the remote labels were fetched and every call succeeded.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.fetch_error.is_none()
    }

    /// Returns true if any labels were successfully applied (created or updated).
    pub fn has_changes(&self) -> bool {
        self.created > 0 || self.updated > 0
    }

    /// Returns true if the remote labels were treated as empty because they
    /// couldn't be fetched.
    pub fn remote_fetch_failed(&self) -> bool {
        self.fetch_error.is_some()
    }

    /// Every error recorded for this repository, the fetch error first.
    pub fn errors(&self) -> impl Iterator<Item = &SyncError> {
        self.fetch_error
            .iter()
            .chain(self.outcomes.iter().filter_map(|o| o.error.as_ref()))
    }
}

/// Result of a whole sync run.
///
/// The run itself never fails; callers decide what a non-successful report
/// means for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub repositories: Vec<RepositorySyncResult>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> usize {
        self.repositories.iter().map(|r| r.created).sum()
    }

    pub fn updated(&self) -> usize {
        self.repositories.iter().map(|r| r.updated).sum()
    }

    pub fn unchanged(&self) -> usize {
        self.repositories.iter().map(|r| r.unchanged).sum()
    }

    pub fn excluded(&self) -> usize {
        self.repositories.iter().map(|r| r.excluded).sum()
    }

    pub fn failed(&self) -> usize {
        self.repositories.iter().map(|r| r.failed).sum()
    }

    /// Number of repositories whose labels could not be fetched.
    pub fn fetch_failures(&self) -> usize {
        self.repositories
            .iter()
            .filter(|r| r.remote_fetch_failed())
            .count()
    }

    /// Returns true if every repository synced without errors.
    pub fn is_success(&self) -> bool {
        self.repositories.iter().all(RepositorySyncResult::is_success)
    }

    pub fn has_changes(&self) -> bool {
        self.repositories.iter().any(RepositorySyncResult::has_changes)
    }
}
