use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::PullRequest;

/// The name of a changelog category, used as the key under `changes` in a release.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Pull requests which match no rule end up here.
    pub const TRIVIAL: &'static str = "trivial";

    #[must_use]
    pub fn trivial() -> Self {
        Self(Self::TRIVIAL.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for CategoryName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Pull requests carrying any of `labels` belong in the category `name`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryRule {
    pub name: CategoryName,
    pub labels: Vec<String>,
}

impl CategoryRule {
    pub fn new<I>(name: impl Into<CategoryName>, labels: impl IntoIterator<Item = I>) -> Self
    where
        I: Into<String>,
    {
        Self {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn matches(&self, pull_request: &PullRequest) -> bool {
        pull_request.has_any_label(&self.labels)
    }
}

/// Where a single pull request belongs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Classification<'rules> {
    /// The first rule, in order, with a label in common.
    Matched(&'rules CategoryName),
    /// No rule matched, goes to [`CategoryName::TRIVIAL`].
    Leftover,
    /// Carries a skip label, excluded from the changelog entirely.
    Skipped,
}

/// The ordered classification rules, plus the one rule which excludes pull requests.
///
/// Rules are checked in order and the first match wins, so a pull request labeled both `major`
/// and `bug` only ever lands in whichever of those categories comes first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rules {
    categories: Vec<CategoryRule>,
    skip: CategoryRule,
}

impl Rules {
    pub const SKIP_CHANGELOG: &'static str = "skip_changelog";

    #[must_use]
    pub fn new(categories: Vec<CategoryRule>, skip: CategoryRule) -> Self {
        Self { categories, skip }
    }

    #[must_use]
    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    #[must_use]
    pub fn skip(&self) -> &CategoryRule {
        &self.skip
    }

    #[must_use]
    pub fn classify(&self, pull_request: &PullRequest) -> Classification<'_> {
        let classification = if self.skip.matches(pull_request) {
            Classification::Skipped
        } else {
            self.categories
                .iter()
                .find(|rule| rule.matches(pull_request))
                .map_or(Classification::Leftover, |rule| {
                    Classification::Matched(&rule.name)
                })
        };
        debug!(
            "#{number} {title:?} classified as {classification:?}",
            number = pull_request.number,
            title = pull_request.title,
        );
        classification
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryRule::new("major_changes", ["major", "breaking"]),
                CategoryRule::new("minor_changes", ["minor", "enhancement"]),
                CategoryRule::new("breaking_changes", ["major", "breaking"]),
                CategoryRule::new("deprecated_features", ["deprecated"]),
                CategoryRule::new("removed_features", ["removed"]),
                CategoryRule::new("security_fixes", ["security"]),
                CategoryRule::new("bugfixes", ["bug", "bugfix"]),
            ],
            skip: CategoryRule::new(Self::SKIP_CHANGELOG, [Self::SKIP_CHANGELOG]),
        }
    }
}
