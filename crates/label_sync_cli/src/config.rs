//! Runtime settings for the label-sync CLI.
//!
//! The CLI has no settings file. The API token and the API root come from the
//! environment, with the system keyring as a fallback for the token.
//!
//! Every function that reads the environment takes the lookup as a parameter;
//! [`env_lookup`] is the one backed by the process environment.

use keyring::Entry;
use std::fmt;
use tracing::{debug, info, warn};

use crate::errors::Error;

/// Environment variables checked for an API token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Environment variable overriding the GitHub API root.
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";

/// Environment variable holding `tracing` filter directives.
pub const LOG_ENV_VAR: &str = "LABEL_SYNC_LOG";

pub const KEY_RING_SERVICE_NAME: &str = "label_sync_cli";
pub const KEY_RING_USER_TOKEN: &str = "github_token";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Where the API token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment(&'static str),
    Keyring,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Environment(var) => write!(f, "environment variable {}", var),
            TokenSource::Keyring => write!(f, "system keyring"),
        }
    }
}

/// An API token and its origin.
///
/// The token is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    source: TokenSource,
}

impl Credentials {
    pub fn new(token: impl Into<String>, source: TokenSource) -> Self {
        Self {
            token: token.into(),
            source,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn source(&self) -> TokenSource {
        self.source
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Reads a variable from the process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Returns the first non-blank token from [`TOKEN_ENV_VARS`].
pub fn token_from_env<F>(lookup: F) -> Option<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    TOKEN_ENV_VARS.iter().copied().find_map(|var| {
        lookup(var)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(|token| Credentials::new(token, TokenSource::Environment(var)))
    })
}

/// Reads the token stored in the system keyring.
///
/// A missing entry or an unusable keyring both give `None`; the caller
/// reports the absence of a token.
pub fn token_from_keyring() -> Option<String> {
    let entry = match Entry::new(KEY_RING_SERVICE_NAME, KEY_RING_USER_TOKEN) {
        Ok(entry) => entry,
        Err(e) => {
            warn!(error = %e, "Failed to create an entry in the keyring");
            return None;
        }
    };

    match entry.get_password() {
        Ok(token) => Some(token),
        Err(keyring::Error::NoEntry) => {
            debug!("No GitHub token stored in the keyring");
            None
        }
        Err(e) => {
            warn!(error = %e, "Failed to get the GitHub token from the keyring");
            None
        }
    }
}

/// Finds the API token, checking the environment before the keyring.
///
/// # Errors
///
/// Returns `Error::ClientUnavailable` if no source provides a token.
pub fn resolve_credentials<F, K>(lookup: F, keyring: K) -> Result<Credentials, Error>
where
    F: Fn(&str) -> Option<String>,
    K: FnOnce() -> Option<String>,
{
    let credentials = token_from_env(lookup)
        .or_else(|| {
            keyring()
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .map(|token| Credentials::new(token, TokenSource::Keyring))
        })
        .ok_or_else(|| {
            Error::ClientUnavailable(format!(
                "no GitHub token found. Set {} or {}, or store a token in the keyring under service '{}', entry '{}'",
                TOKEN_ENV_VARS[0], TOKEN_ENV_VARS[1], KEY_RING_SERVICE_NAME, KEY_RING_USER_TOKEN
            ))
        })?;

    info!(source = %credentials.source(), "Resolved GitHub token");
    Ok(credentials)
}

/// Returns the API root from [`API_URL_ENV_VAR`], if set and non-blank.
pub fn api_base_url<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(API_URL_ENV_VAR)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
