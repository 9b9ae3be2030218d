//! Planning of label mutations.
//!
//! Pure functions that compare declared labels with the labels observed in a
//! repository. Names are the join key; only `color` and `description` are
//! compared, by exact string equality.

use config_manager::{LabelDefinition, LabelSet, RepoSyncTarget};
use github_client::Label;
use std::collections::HashMap;
use std::fmt;

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;

/// What the synchronizer will do with one declared label in one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelAction {
    /// The label doesn't exist remotely.
    Create,
    /// The label exists with a different color or description.
    Update,
    /// The label exists and matches.
    Unchanged,
    /// The repository excludes this label; nothing is done whatever the remote state.
    Excluded,
}

impl LabelAction {
    /// Returns true if the action results in an API call.
    pub fn is_mutation(&self) -> bool {
        matches!(self, LabelAction::Create | LabelAction::Update)
    }
}

impl fmt::Display for LabelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LabelAction::Create => "create",
            LabelAction::Update => "update",
            LabelAction::Unchanged => "unchanged",
            LabelAction::Excluded => "excluded",
        };
        f.write_str(text)
    }
}

/// A declared label paired with its planned action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLabel<'a> {
    pub definition: &'a LabelDefinition,
    pub action: LabelAction,
}

/// Decides the action for a single label.
///
/// Exclusion wins over everything else, so an excluded label is never
/// created or updated.
pub fn plan_label_action(
    definition: &LabelDefinition,
    remote: Option<&Label>,
    excluded: bool,
) -> LabelAction {
    if excluded {
        return LabelAction::Excluded;
    }

    match remote {
        None => LabelAction::Create,
        Some(existing)
            if existing.color != definition.color
                || existing.description != definition.description =>
        {
            LabelAction::Update
        }
        Some(_) => LabelAction::Unchanged,
    }
}

/// Indexes remote labels by name.
///
/// If the remote list repeats a name the last entry wins.
pub fn index_remote_labels(remote: &[Label]) -> HashMap<&str, &Label> {
    remote.iter().map(|l| (l.name.as_str(), l)).collect()
}

/// Plans every declared label for one repository, in declaration order.
pub fn plan_repository<'a>(
    labels: &'a LabelSet,
    target: &RepoSyncTarget,
    remote: &[Label],
) -> Vec<PlannedLabel<'a>> {
    let remote_by_name = index_remote_labels(remote);

    labels
        .labels
        .iter()
        .map(|definition| PlannedLabel {
            definition,
            action: plan_label_action(
                definition,
                remote_by_name.get(definition.name.as_str()).copied(),
                target.is_excluded(&definition.name),
            ),
        })
        .collect()
}
