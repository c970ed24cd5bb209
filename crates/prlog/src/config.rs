use std::{
    fmt::{self, Display},
    io,
    path::{Path, PathBuf},
    str::FromStr,
};

use itertools::Itertools;
use miette::{Diagnostic, NamedSource, SourceSpan};
use prlog_changelog::{CategoryName, CategoryRule, Rules};
use serde::Deserialize;
use thiserror::Error;
use toml::Spanned;
use tracing::{debug, warn};

use crate::{cli::Cli, fs};

/// Everything a run needs, merged from the command line, the environment, and the config file.
#[derive(Clone, Debug)]
pub struct Config {
    pub repository: Repository,
    pub token: Option<String>,
    pub api_url: String,
    pub since: ReleaseRef,
    pub to: ReleaseRef,
    pub changelog: PathBuf,
    pub rules: Rules,
    pub dry_run: bool,
}

impl Config {
    pub const DEFAULT_CHANGELOG: &'static str = "changelogs/changelog.yaml";

    /// Read the config file named by `cli` (if there is one) and apply `cli` on top of it.
    ///
    /// ## Errors
    /// 1. The config file exists but can't be read or parsed
    /// 2. No valid repository was given anywhere
    pub fn load(cli: Cli) -> Result<Self, Error> {
        let file = match std::fs::metadata(&cli.config) {
            Ok(_) => {
                let source_code = fs::read_to_string(cli.config.as_path())?;
                ConfigFile::parse(&cli.config, source_code)?
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No {} found, using defaults", cli.config.display());
                ConfigFile::default()
            }
            Err(source) => {
                return Err(fs::Error::Read {
                    path: cli.config,
                    source,
                }
                .into())
            }
        };
        Self::merge(cli, file)
    }

    fn merge(cli: Cli, file: ConfigFile) -> Result<Self, Error> {
        let repository = cli
            .repository
            .or(file.repository)
            .filter(|repository| !repository.trim().is_empty())
            .ok_or(Error::MissingRepository)?
            .parse()?;

        let mut categories = if file.categories.is_empty() {
            Rules::default().categories().to_vec()
        } else {
            file.categories
                .into_iter()
                .map(|category| {
                    let CategoryConfig { name, labels } = category.into_inner();
                    CategoryRule::new(name, labels)
                })
                .collect()
        };
        for (name, labels) in cli.labels.categories() {
            if let Some(rule) = categories
                .iter_mut()
                .find(|rule| rule.name.as_str() == name)
            {
                rule.labels = labels.to_vec();
            } else {
                warn!("There is no category named {name}, ignoring the labels given for it");
            }
        }
        let skip_labels = if cli.labels.skip_changelog_labels.is_empty() {
            file.skip_labels
                .unwrap_or_else(|| vec![Rules::SKIP_CHANGELOG.to_string()])
        } else {
            cli.labels.skip_changelog_labels
        };
        let skip = CategoryRule::new(Rules::SKIP_CHANGELOG, skip_labels);

        Ok(Self {
            repository,
            token: cli.github_token.filter(|token| !token.is_empty()),
            api_url: cli.api_url.trim_end_matches('/').to_string(),
            since: ReleaseRef::from(cli.since_version.or(file.since_version)),
            to: ReleaseRef::from(cli.to_version.or(file.to_version)),
            changelog: cli
                .changelog
                .or(file.changelog)
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_CHANGELOG)),
            rules: Rules::new(categories, skip),
            dry_run: cli.dry_run,
        })
    }
}

/// The optional `prlog.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    repository: Option<String>,
    since_version: Option<String>,
    to_version: Option<String>,
    changelog: Option<PathBuf>,
    skip_labels: Option<Vec<String>>,
    /// Replaces the default categories, in order of precedence.
    #[serde(default)]
    categories: Vec<Spanned<CategoryConfig>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryConfig {
    name: CategoryName,
    labels: Vec<String>,
}

impl ConfigFile {
    fn parse(path: &Path, source_code: String) -> Result<Self, Error> {
        let file: Self = match toml::from_str(&source_code) {
            Ok(file) => file,
            Err(err) => {
                return Err(Error::Toml {
                    message: err.message().to_string(),
                    span: err.span().map(SourceSpan::from),
                    source_code: NamedSource::new(path.display().to_string(), source_code),
                })
            }
        };
        let duplicate = file
            .categories
            .iter()
            .duplicates_by(|category| category.get_ref().name.clone())
            .next();
        if let Some(duplicate) = duplicate {
            return Err(Error::DuplicateCategory {
                name: duplicate.get_ref().name.clone(),
                span: duplicate.span().into(),
                source_code: NamedSource::new(path.display().to_string(), source_code),
            });
        }
        Ok(file)
    }
}

/// An `owner/repo` pair on GitHub.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Repository {
    pub owner: String,
    pub repo: String,
}

impl FromStr for Repository {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidRepository(s.to_string());
        let (owner, repo) = s.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Which release marks one end of the window of merged pull requests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReleaseRef {
    /// No bound at this end.
    Unset,
    /// The newest published release.
    Latest,
    Tag(String),
}

impl From<Option<String>> for ReleaseRef {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            None | Some("") => Self::Unset,
            Some("latest") => Self::Latest,
            Some(tag) => Self::Tag(tag.to_string()),
        }
    }
}

impl Display for ReleaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("(unset)"),
            Self::Latest => f.write_str("the latest release"),
            Self::Tag(tag) => write!(f, "release {tag}"),
        }
    }
}

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error("Could not parse the config file: {message}")]
    #[diagnostic(code(config::toml), help("Check the TOML is valid."))]
    Toml {
        message: String,
        #[source_code]
        source_code: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },
    #[error("The category {name} is defined more than once")]
    #[diagnostic(
        code(config::duplicate_category),
        help("Combine the labels into a single category.")
    )]
    DuplicateCategory {
        name: CategoryName,
        #[source_code]
        source_code: NamedSource<String>,
        #[label("defined again here")]
        span: SourceSpan,
    },
    #[error("No GitHub repository was given")]
    #[diagnostic(
        code(config::missing_repository),
        help("Set GITHUB_REPOSITORY, pass --repository, or add `repository` to the config file.")
    )]
    MissingRepository,
    #[error("{0} is not a GitHub repository")]
    #[diagnostic(
        code(config::invalid_repository),
        help("The repository must look like `owner/repo`.")
    )]
    InvalidRepository(String),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fs(#[from] fs::Error),
}
