//! Command modules for the label-sync CLI.
//!
//! - `sync_cmd`: reconciles the declared labels into every configured repository

pub mod sync_cmd;
