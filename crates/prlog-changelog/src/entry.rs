use std::{
    fmt::{self, Display},
    sync::OnceLock,
};

use regex::Regex;

use crate::PullRequest;

/// A single line in a changelog category, `"{title} ({url})"`.
///
/// The pull request number is carried alongside the text so ordering never has to re-parse it.
/// Two entries are equal when their text is.
#[derive(Clone, Debug)]
pub struct ChangelogEntry {
    text: String,
    url: Option<String>,
    number: Option<u64>,
}

impl ChangelogEntry {
    /// Parse a line that was previously written to the changelog.
    ///
    /// Lines which don't end in a parenthesized URL are kept as-is; they never match a pull
    /// request and sort last.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let url = text
            .strip_suffix(')')
            .and_then(|rest| rest.rsplit_once(" ("))
            .map(|(_, url)| url.to_string());
        let number = url.as_deref().and_then(number_from_url);
        Self {
            text: text.to_string(),
            url,
            number,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The pull request number, `0` if none could be found.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number.unwrap_or_default()
    }

    /// Whether this is an outdated line for `pull_request`: same URL, different text.
    #[must_use]
    pub fn is_stale_for(&self, pull_request: &PullRequest, current: &Self) -> bool {
        self.url.as_deref() == Some(pull_request.url.as_str()) && self.text != current.text
    }
}

impl PartialEq for ChangelogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ChangelogEntry {}

impl From<&PullRequest> for ChangelogEntry {
    fn from(pull_request: &PullRequest) -> Self {
        Self {
            text: format!(
                "{title} ({url})",
                title = pull_request.title,
                url = pull_request.url
            ),
            url: Some(pull_request.url.clone()),
            number: Some(pull_request.number),
        }
    }
}

impl Display for ChangelogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn number_from_url(url: &str) -> Option<u64> {
    static PULL_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();
    PULL_NUMBER
        .get_or_init(|| Regex::new(r"/pull/(\d+)").ok())
        .as_ref()?
        .captures(url)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
