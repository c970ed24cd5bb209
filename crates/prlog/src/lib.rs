use std::io::IsTerminal;

use miette::Diagnostic;
use prlog_changelog::{document, ChangelogDocument, Update, Window};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use crate::{
    cli::Cli,
    config::{Config, ReleaseRef, Repository},
    github::GitHub,
};
use crate::fs::WriteType;

mod cli;
mod config;
mod fs;
mod github;

/// How a run ended, when it didn't fail.
#[derive(Debug)]
pub enum Outcome {
    /// GitHub had no merged pull requests in the window, the changelog wasn't read.
    NothingMerged,
    /// Every pull request was already in the changelog.
    UpToDate(Update),
    /// The changelog was written, or would have been on a dry run.
    Updated(Update),
}

/// Fetch the merged pull requests and merge them into the changelog.
///
/// ## Errors
///
/// If the changelog can't be read, isn't shaped like a changelog, or can't be written. Problems
/// talking to GitHub are only logged.
pub async fn run(config: Config) -> Result<Outcome, Error> {
    let github = GitHub::new(
        config.repository.clone(),
        &config.api_url,
        config.token.clone(),
    )?;

    let since = github.release_date(&config.since).await;
    let until = github.release_date(&config.to).await;
    if until.is_none() && config.to != ReleaseRef::Unset {
        warn!(
            "Collecting pull requests without an upper bound since {} was not found",
            config.to
        );
    }
    let window = Window::new(since, until);
    if window.is_unbounded() {
        info!(
            "Collecting every merged pull request of {}",
            config.repository
        );
    }

    let pull_requests = github.merged_pull_requests(&window).await;
    if pull_requests.is_empty() {
        info!("No merged pull requests found for {}", config.repository);
        return Ok(Outcome::NothingMerged);
    }

    let content = fs::read_to_string(config.changelog.as_path())?;
    let mut document = ChangelogDocument::new(content)?;
    let update = prlog_changelog::update(&mut document, &pull_requests, &config.rules)?;
    let Some(section) = update.section.as_deref() else {
        info!(
            "{path} already lists every merged pull request",
            path = config.changelog.display()
        );
        return Ok(Outcome::UpToDate(update));
    };

    let write = if config.dry_run {
        WriteType::DryRun(section)
    } else {
        WriteType::Real(document.content())
    };
    fs::write(write, &config.changelog)?;
    info!(
        "Added {added} and removed {removed} entries in release {version} of {path}",
        added = update.reconciled.added,
        removed = update.reconciled.removed,
        version = update.version,
        path = config.changelog.display(),
    );
    Ok(Outcome::Updated(update))
}

/// Log to stdout, filtered by `RUST_LOG` if it's set.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,prlog={level},prlog_changelog={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .without_time()
        .init();
}

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] config::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    GitHub(#[from] github::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fs(#[from] fs::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Changelog(#[from] document::Error),
}
