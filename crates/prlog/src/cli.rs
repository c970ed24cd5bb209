use std::path::PathBuf;

use clap::{Args, Parser};

use crate::github::DEFAULT_API_URL;

/// Add the merged pull requests of a GitHub repository to the current release of a YAML changelog,
/// sorted into categories by their labels.
#[derive(Clone, Debug, Default, Parser)]
#[command(name = "prlog", version, about)]
pub struct Cli {
    /// The GitHub repository, as `owner/repo`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// A token for the GitHub API, required for private repositories.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Collect pull requests merged since this release: `latest` or a tag. Empty means all.
    #[arg(long, env = "SINCE_VERSION")]
    pub since_version: Option<String>,

    /// Only collect pull requests merged up to this release tag.
    #[arg(long, env = "TO_VERSION")]
    pub to_version: Option<String>,

    /// The changelog to update [default: changelogs/changelog.yaml]
    #[arg(long, env = "CHANGELOG_PATH")]
    pub changelog: Option<PathBuf>,

    /// An optional TOML file with the same settings, plus custom categories.
    #[arg(long, env = "PRLOG_CONFIG", default_value = "prlog.toml")]
    pub config: PathBuf,

    /// The base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(flatten)]
    pub labels: LabelOverrides,

    /// Print what would be written to the changelog instead of writing it.
    #[arg(long)]
    pub dry_run: bool,

    /// Log every classification decision.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Replace the labels of one of the categories.
#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "Labels")]
pub struct LabelOverrides {
    /// Labels for major changes [default: major, breaking]
    #[arg(long, env = "MAJOR_CHANGES_LABELS", value_delimiter = ',')]
    pub major_changes_labels: Vec<String>,
    /// Labels for minor changes [default: minor, enhancement]
    #[arg(long, env = "MINOR_CHANGES_LABELS", value_delimiter = ',')]
    pub minor_changes_labels: Vec<String>,
    /// Labels for breaking changes [default: major, breaking]
    #[arg(long, env = "BREAKING_CHANGES_LABELS", value_delimiter = ',')]
    pub breaking_changes_labels: Vec<String>,
    /// Labels for deprecated features [default: deprecated]
    #[arg(long, env = "DEPRECATED_FEATURES_LABELS", value_delimiter = ',')]
    pub deprecated_features_labels: Vec<String>,
    /// Labels for removed features [default: removed]
    #[arg(long, env = "REMOVED_FEATURES_LABELS", value_delimiter = ',')]
    pub removed_features_labels: Vec<String>,
    /// Labels for security fixes [default: security]
    #[arg(long, env = "SECURITY_FIXES_LABELS", value_delimiter = ',')]
    pub security_fixes_labels: Vec<String>,
    /// Labels for bugfixes [default: bug, bugfix]
    #[arg(long, env = "BUGFIXES_LABELS", value_delimiter = ',')]
    pub bugfixes_labels: Vec<String>,
    /// Pull requests with any of these labels are left out [default: skip_changelog]
    #[arg(long, env = "SKIP_CHANGELOG_LABELS", value_delimiter = ',')]
    pub skip_changelog_labels: Vec<String>,
}

impl LabelOverrides {
    /// Category name and labels of every category that was overridden.
    pub(crate) fn categories(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        [
            ("major_changes", &self.major_changes_labels),
            ("minor_changes", &self.minor_changes_labels),
            ("breaking_changes", &self.breaking_changes_labels),
            ("deprecated_features", &self.deprecated_features_labels),
            ("removed_features", &self.removed_features_labels),
            ("security_fixes", &self.security_fixes_labels),
            ("bugfixes", &self.bugfixes_labels),
        ]
        .into_iter()
        .filter(|(_, labels)| !labels.is_empty())
        .map(|(name, labels)| (name, labels.as_slice()))
    }
}
