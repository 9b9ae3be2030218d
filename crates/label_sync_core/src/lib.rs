//! # Label Sync Core
//!
//! This crate reconciles the labels of GitHub repositories with a declared
//! label set.
//!
//! ## Overview
//!
//! For each target repository the synchronizer:
//! 1. Fetches the labels that exist remotely
//! 2. Plans an action per declared label ([`LabelAction`])
//! 3. Creates missing labels and updates labels whose color or description differs
//! 4. Records what happened in a [`RepositorySyncResult`]
//!
//! Labels that exist remotely but aren't declared are never touched, and
//! labels excluded by a repository are never created or updated there.
//!
//! ## Error Handling
//!
//! Nothing in a run is fatal. A repository whose labels can't be fetched is
//! treated as having no labels, and failed create or update calls are
//! recorded as [`SyncError`]s in the [`SyncReport`]. Callers decide whether a
//! report with failures is a failure for them.
//!
//! ## Architecture
//!
//! API access goes through the [`github_client::LabelClient`] trait, so the
//! synchronizer runs unchanged against the GitHub client or a test double.

pub mod errors;
pub use errors::SyncError;

pub mod plan;
pub use plan::{index_remote_labels, plan_label_action, plan_repository, LabelAction, PlannedLabel};

pub mod report;
pub use report::{LabelOutcome, RepositorySyncResult, SyncReport};

pub mod synchronizer;
pub use synchronizer::{LabelSynchronizer, SyncProgress};
