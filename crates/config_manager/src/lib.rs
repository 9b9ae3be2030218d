//! Configuration management for label synchronization.
//!
//! Two JSON documents drive a sync run:
//!
//! - the label set, `{"labels": [{"name", "color"?, "description"?}, ...]}`
//! - the repository sync configuration,
//!   `{"repo_configs": [{"repo": "owner/name", "exclude_labels"?: [...]}, ...]}`
//!
//! Both are deserialized into typed records and validated when loaded, so a
//! malformed document fails before any repository is touched.
//!
//! ## Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! let config = config_manager::load_sync_config(
//!     Path::new("labels.json"),
//!     Path::new("repos.json"),
//! )?;
//! println!(
//!     "{} labels for {} repositories",
//!     config.labels.len(),
//!     config.repos.repo_configs.len()
//! );
//! # Ok::<(), config_manager::ConfigurationError>(())
//! ```

pub mod errors;
pub mod label_set;
pub mod loader;
pub mod repo_sync;

// Re-export for convenient access
pub use errors::{ConfigurationError, ConfigurationResult};
pub use label_set::{LabelDefinition, LabelSet, DEFAULT_LABEL_COLOR};
pub use loader::{load_label_set, load_repo_sync_config, load_sync_config, SyncConfig};
pub use repo_sync::{RepoSyncConfig, RepoSyncTarget};
