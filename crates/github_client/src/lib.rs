//! Crate for interacting with the GitHub label REST API.
//!
//! This crate provides the [`LabelClient`] capability used by the label
//! synchronizer and a [`GitHubClient`] implementation backed by octocrab,
//! authenticated with a personal or installation access token.

use async_trait::async_trait;
use octocrab::{Octocrab, Page, Result as OctocrabResult};
use serde::Serialize;
use tracing::{debug, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod label;
pub use label::{Label, LabelPayload, LabelUpdatePayload};

pub mod repository;
pub use repository::RepositoryId;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Page size requested when listing labels. 100 is the GitHub maximum.
pub const LABELS_PER_PAGE: u8 = 100;

/// Label operations needed to reconcile a repository.
///
/// Implementations must be usable from a single task issuing one request at a
/// time; no ordering guarantees beyond that are assumed.
#[async_trait]
pub trait LabelClient: Send + Sync {
    /// Checks that the client is authenticated.
    ///
    /// # Returns
    ///
    /// The login of the authenticated account.
    ///
    /// # Errors
    ///
    /// Returns `Error::AuthError` if the credentials are rejected.
    async fn authenticated_user(&self) -> Result<String, Error>;

    /// Lists every label defined in a repository, following pagination.
    async fn list_labels(&self, repo: &RepositoryId) -> Result<Vec<Label>, Error>;

    /// Creates a label in a repository.
    async fn create_label(&self, repo: &RepositoryId, label: &LabelPayload)
        -> Result<Label, Error>;

    /// Changes the color and description of an existing label.
    ///
    /// # Arguments
    ///
    /// * `repo` - The repository holding the label.
    /// * `name` - The current label name. It is percent-encoded into the URL path.
    /// * `update` - The new color and description.
    async fn update_label(
        &self,
        repo: &RepositoryId,
        name: &str,
        update: &LabelUpdatePayload,
    ) -> Result<Label, Error>;
}

/// A client for the GitHub label API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` around an already authenticated `Octocrab` instance.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use github_client::{create_token_client, GitHubClient};
    ///
    /// # fn example() -> Result<(), github_client::Error> {
    /// let octocrab = create_token_client("ghp_example", None)?;
    /// let client = GitHubClient::new(octocrab);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[derive(Serialize)]
struct ListLabelsParams {
    per_page: u8,
}

#[async_trait]
impl LabelClient for GitHubClient {
    #[instrument(skip(self))]
    async fn authenticated_user(&self) -> Result<String, Error> {
        let response: OctocrabResult<serde_json::Value> =
            self.client.get("/user", None::<&()>).await;

        let user = response.map_err(|e| map_octocrab_error("Failed to check authentication", e))?;

        let login = user
            .get("login")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                debug!("Authenticated user response did not contain a login");
                Error::InvalidResponse
            })?
            .to_string();

        info!(login = login, "Authenticated with GitHub");
        Ok(login)
    }

    /// Lists labels using `GET /repos/{owner}/{repo}/labels`.
    ///
    /// The first page is requested with the maximum page size; the remaining
    /// pages are fetched by following the `Link: rel="next"` header.
    #[instrument(skip(self), fields(repo = %repo))]
    async fn list_labels(&self, repo: &RepositoryId) -> Result<Vec<Label>, Error> {
        let path = format!("/repos/{}/{}/labels", repo.owner(), repo.name());
        let params = ListLabelsParams {
            per_page: LABELS_PER_PAGE,
        };

        let first_page: OctocrabResult<Page<Label>> = self.client.get(path, Some(&params)).await;
        let first_page =
            first_page.map_err(|e| map_octocrab_error("Failed to list repository labels", e))?;

        let labels = self
            .client
            .all_pages(first_page)
            .await
            .map_err(|e| map_octocrab_error("Failed to fetch next page of labels", e))?;

        debug!(count = labels.len(), "Fetched repository labels");
        Ok(labels)
    }

    #[instrument(skip(self, label), fields(repo = %repo, name = %label.name))]
    async fn create_label(
        &self,
        repo: &RepositoryId,
        label: &LabelPayload,
    ) -> Result<Label, Error> {
        let path = format!("/repos/{}/{}/labels", repo.owner(), repo.name());
        let response: OctocrabResult<Label> = self.client.post(path, Some(label)).await;

        response.map_err(|e| map_octocrab_error("Failed to create label", e))
    }

    #[instrument(skip(self, update), fields(repo = %repo, name = %name))]
    async fn update_label(
        &self,
        repo: &RepositoryId,
        name: &str,
        update: &LabelUpdatePayload,
    ) -> Result<Label, Error> {
        let path = label_path(repo, name);
        debug!(path = path, "Updating label");

        let response: OctocrabResult<Label> = self.client.patch(path, Some(update)).await;

        response.map_err(|e| map_octocrab_error("Failed to update label", e))
    }
}

/// Builds the URL path of a single label.
///
/// Every byte of the name outside `A-Z a-z 0-9 - _ . ~` is percent-encoded, so
/// names containing spaces, slashes or colons address the right label.
pub fn label_path(repo: &RepositoryId, name: &str) -> String {
    format!(
        "/repos/{}/{}/labels/{}",
        repo.owner(),
        repo.name(),
        urlencoding::encode(name)
    )
}

/// Creates an `Octocrab` client authenticated with an access token.
///
/// # Arguments
///
/// * `token` - A personal access token or installation token.
/// * `base_uri` - Optional API root, e.g. a GitHub Enterprise server. When
///   `None` the public `https://api.github.com` endpoint is used.
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URI is invalid or the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &str, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder().personal_token(token.to_string());

    if let Some(uri) = base_uri {
        debug!(base_uri = uri, "Using custom GitHub API root");
        builder = builder.base_uri(uri).map_err(|e| {
            debug!(base_uri = uri, error = %e, "Invalid GitHub API root");
            Error::AuthError(format!("Invalid GitHub API URL '{}': {}", uri, e))
        })?;
    }

    builder.build().map_err(|e| {
        debug!(error = ?e, "Failed to build Octocrab client from token");
        Error::AuthError(format!("Failed to build GitHub client: {}", e))
    })
}

fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            debug!(
                status = status,
                error_message = source.message.as_str(),
                "{}. Received an error from GitHub",
                message
            );

            match status {
                401 => Error::AuthError(source.message),
                404 => Error::NotFound,
                429 => Error::RateLimitExceeded,
                403 if source.message.to_lowercase().contains("rate limit") => {
                    Error::RateLimitExceeded
                }
                _ => Error::ApiError {
                    status,
                    message: source.message,
                },
            }
        }
        octocrab::Error::Serde { source, .. } => {
            debug!(
                error_message = source.to_string(),
                "{}. Failed to deserialize the response.", message
            );
            Error::Deserialization(source)
        }
        _ => {
            debug!(error_message = e.to_string(), "{}", message);
            Error::Transport(e.to_string())
        }
    }
}
