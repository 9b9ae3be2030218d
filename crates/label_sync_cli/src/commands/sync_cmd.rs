//! The label sync command.
//!
//! Sets up the GitHub client, checks that it is authenticated, loads both
//! configuration documents and reconciles every configured repository,
//! printing progress to stdout as each repository completes.

use clap::Args;
use colored::Colorize;
use config_manager::load_sync_config;
use github_client::{create_token_client, GitHubClient, LabelClient};
use label_sync_core::{
    LabelAction, LabelOutcome, LabelSynchronizer, RepositorySyncResult, SyncProgress, SyncReport,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

use crate::{
    config::{api_base_url, env_lookup, resolve_credentials, token_from_keyring},
    errors::Error,
};

#[cfg(test)]
#[path = "sync_cmd_tests.rs"]
mod tests;

/// Arguments of a sync run.
#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// Path to the JSON file declaring the labels
    #[arg(short = 'l', long, value_name = "FILE")]
    pub label_config: PathBuf,

    /// Path to the JSON file listing the target repositories
    #[arg(short = 'r', long, value_name = "FILE")]
    pub repo_config: PathBuf,
}

impl SyncArgs {
    /// Rejects paths that can never be a configuration file.
    ///
    /// Missing files are reported by the loader, which classifies them.
    pub fn validate(&self) -> Result<(), Error> {
        check_not_directory("--label-config", &self.label_config)?;
        check_not_directory("--repo-config", &self.repo_config)
    }
}

fn check_not_directory(flag: &str, path: &Path) -> Result<(), Error> {
    if path.is_dir() {
        return Err(Error::InvalidArguments(format!(
            "{} must point to a JSON file, but {} is a directory",
            flag,
            path.display()
        )));
    }
    Ok(())
}

/// Runs a sync with a GitHub client built from the environment.
///
/// # Errors
///
/// Returns an error for every fatal setup failure:
/// - `Error::InvalidArguments` if a configuration path is a directory
/// - `Error::ClientUnavailable` if no token is found or the client can't be built
/// - `Error::Auth` if GitHub rejects the token
/// - `Error::Config` if either document can't be loaded
///
/// Failed label operations don't produce an error; they are reported in the
/// returned [`SyncReport`].
#[instrument(skip(args), fields(label_config = %args.label_config.display(), repo_config = %args.repo_config.display()))]
pub async fn execute(args: &SyncArgs) -> Result<SyncReport, Error> {
    let credentials = resolve_credentials(env_lookup, token_from_keyring)?;
    let base_url = api_base_url(env_lookup);

    let octocrab = create_token_client(credentials.token(), base_url.as_deref()).map_err(|e| {
        error!(message = "Failed to create GitHub client", error = ?e);
        Error::ClientUnavailable(e.to_string())
    })?;

    run_sync(GitHubClient::new(octocrab), args).await
}

/// Runs a sync with the given client.
///
/// The client is checked for authentication before any file is read, and
/// both documents are loaded before any repository is touched.
pub async fn run_sync<C: LabelClient>(client: C, args: &SyncArgs) -> Result<SyncReport, Error> {
    args.validate()?;

    let login = client.authenticated_user().await.map_err(|e| {
        error!(message = "GitHub client is not authenticated", error = %e);
        Error::Auth(e.to_string())
    })?;
    info!(login = login, "Authenticated");

    let config = load_sync_config(&args.label_config, &args.repo_config)?;
    println!("{}", format_label_count(config.labels.len()));

    let synchronizer = LabelSynchronizer::new(client);
    let report = synchronizer
        .sync_with_progress(&config.labels, &config.repos, print_progress)
        .await;

    println!();
    print!("{}", format_summary(&report));
    Ok(report)
}

fn print_progress(progress: SyncProgress<'_>) {
    match progress {
        SyncProgress::RepositoryStarted(target) => {
            println!();
            println!("{}", format_repository_header(&target.repo.to_string()));
        }
        SyncProgress::RepositoryFinished(result) => {
            print!("{}", format_repository_result(result));
        }
    }
}

fn format_label_count(count: usize) -> String {
    format!("Found {} labels in configuration file", count)
}

fn format_repository_header(repository: &str) -> String {
    format!(
        "{} Syncing labels to repository: {}",
        "==>".bold().bright_cyan(),
        repository.bold()
    )
}

fn format_warning(message: &str) -> String {
    format!("  {} {}\n", "Warning:".yellow().bold(), message)
}

/// Formats the lines printed for one declared label.
fn format_outcome(outcome: &LabelOutcome) -> String {
    let name = outcome.label.as_str();
    let mut output = match outcome.action {
        LabelAction::Excluded => format!("  Skipping excluded label: {}\n", name),
        LabelAction::Unchanged => format!("  Label unchanged: {}\n", name.dimmed()),
        LabelAction::Create => format!("  Creating label: {}\n", name.green()),
        LabelAction::Update => format!("  Updating label: {}\n", name.blue()),
    };

    if outcome.error.is_some() {
        let verb = match outcome.action {
            LabelAction::Update => "update",
            _ => "create",
        };
        output.push_str(&format_warning(&format!(
            "Failed to {} label '{}'",
            verb, name
        )));
    }

    output
}

/// Formats everything printed after a repository's header.
fn format_repository_result(result: &RepositorySyncResult) -> String {
    let mut output = String::new();

    if result.remote_fetch_failed() {
        output.push_str(&format_warning(&format!(
            "Could not fetch labels from {} (might not exist or no permissions)",
            result.repository
        )));
    }

    for outcome in &result.outcomes {
        output.push_str(&format_outcome(outcome));
    }

    if !result.failed_labels.is_empty() {
        output.push_str(&format_warning(&format!(
            "Labels not applied to {}: {}",
            result.repository,
            result.failed_labels.join(", ")
        )));
    }

    output.push_str(&format!(
        "  Completed syncing labels to {}\n",
        result.repository
    ));
    output
}

fn format_summary(report: &SyncReport) -> String {
    let mut output = String::new();

    if report.is_success() {
        output.push_str(&format!(
            "{}\n",
            "Label synchronization completed successfully".green().bold()
        ));
    } else {
        output.push_str(&format!(
            "{}\n",
            "Label synchronization completed with errors".yellow().bold()
        ));
    }

    output.push_str(&format!(
        "Repositories: {}, Created: {}, Updated: {}, Unchanged: {}, Excluded: {}, Failed: {}\n",
        report.repositories.len(),
        report.created(),
        report.updated(),
        report.unchanged(),
        report.excluded(),
        report.failed()
    ));

    if report.is_success() && !report.has_changes() {
        output.push_str("All repositories were already up to date\n");
    }

    if report.fetch_failures() > 0 {
        output.push_str(&format!(
            "Repositories whose labels could not be fetched: {}\n",
            report.fetch_failures()
        ));
    }

    for error in report.repositories.iter().flat_map(|r| r.errors()) {
        output.push_str(&format!("  {} {}\n", "✗".red(), error));
    }

    output
}
