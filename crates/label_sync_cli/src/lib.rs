//! label-sync CLI library exports for integration testing.
//!
//! This module exposes the command implementation and the runtime settings
//! used by the `label-sync` binary.

pub mod commands;
pub mod config;
pub mod errors;
