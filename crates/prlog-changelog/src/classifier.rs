use indexmap::IndexMap;

use crate::{CategoryName, ChangelogEntry, Classification, PullRequest, Rules};

/// Pull requests sorted into their categories.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Classified<'a> {
    /// Rendered entries per matched category, without duplicate lines.
    pub buckets: IndexMap<CategoryName, Vec<ChangelogEntry>>,
    /// Pull requests which matched no rule, destined for [`CategoryName::TRIVIAL`].
    pub leftover: Vec<&'a PullRequest>,
    /// Pull requests excluded by the skip rule.
    pub skipped: Vec<&'a PullRequest>,
}

impl Classified<'_> {
    /// Total number of pull requests which will produce an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum::<usize>() + self.leftover.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assign every pull request to at most one category, see [`Rules::classify`].
#[must_use]
pub fn classify<'a>(pull_requests: &'a [PullRequest], rules: &Rules) -> Classified<'a> {
    let mut classified = Classified::default();
    for pull_request in pull_requests {
        match rules.classify(pull_request) {
            Classification::Skipped => classified.skipped.push(pull_request),
            Classification::Leftover => classified.leftover.push(pull_request),
            Classification::Matched(category) => {
                let entry = ChangelogEntry::from(pull_request);
                let bucket = classified.buckets.entry(category.clone()).or_default();
                if !bucket.contains(&entry) {
                    bucket.push(entry);
                }
            }
        }
    }
    classified
}
