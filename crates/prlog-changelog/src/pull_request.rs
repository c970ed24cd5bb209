use std::collections::BTreeSet;

/// A merged pull request, as returned by the forge.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PullRequest {
    pub title: String,
    pub number: u64,
    pub url: String,
    pub labels: BTreeSet<String>,
}

impl PullRequest {
    pub fn new<L, I>(title: impl Into<String>, number: u64, url: impl Into<String>, labels: L) -> Self
    where
        L: IntoIterator<Item = I>,
        I: Into<String>,
    {
        Self {
            title: title.into(),
            number,
            url: url.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any of `labels` is set on this pull request.
    pub fn has_any_label<'a>(&self, labels: impl IntoIterator<Item = &'a String>) -> bool {
        labels.into_iter().any(|label| self.labels.contains(label))
    }
}
