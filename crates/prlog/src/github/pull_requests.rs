use prlog_changelog::{PullRequest, Window};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Error, GitHub};

const PER_PAGE: usize = 100;
/// The search API never returns more than 1000 results.
const MAX_PAGES: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResults {
    total_count: u64,
    items: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
struct Issue {
    title: String,
    number: u64,
    html_url: String,
    #[serde(default)]
    labels: Vec<Label>,
}

#[derive(Debug, Deserialize)]
struct Label {
    name: String,
}

impl From<Issue> for PullRequest {
    fn from(issue: Issue) -> Self {
        PullRequest::new(
            issue.title,
            issue.number,
            issue.html_url,
            issue.labels.into_iter().map(|label| label.name),
        )
    }
}

impl GitHub {
    /// Every pull request of the repository merged inside `window`, oldest first.
    ///
    /// A failed request ends the search, keeping whatever was found before it.
    pub async fn merged_pull_requests(&self, window: &Window) -> Vec<PullRequest> {
        let query = self.search_query(window);
        debug!("Searching for {query}");
        let mut pull_requests = Vec::new();
        for page in 1..=MAX_PAGES {
            let results = match self.search_page(&query, page).await {
                Ok(results) => results,
                Err(err) => {
                    warn!(
                        "Could not fetch merged pull requests of {repository}: {err}",
                        repository = self.repository
                    );
                    break;
                }
            };
            let received = results.items.len();
            pull_requests.extend(results.items.into_iter().map(PullRequest::from));
            let found_all = u64::try_from(pull_requests.len())
                .map_or(true, |found| found >= results.total_count);
            if received < PER_PAGE || found_all {
                break;
            }
        }
        debug!("Found {} merged pull requests", pull_requests.len());
        pull_requests
    }

    fn search_query(&self, window: &Window) -> String {
        let mut query = format!(
            "repo:{repository} is:pr is:merged sort:author-date-asc",
            repository = self.repository
        );
        if let Some(merged) = window.merged_qualifier() {
            query.push(' ');
            query.push_str(&merged);
        }
        query
    }

    async fn search_page(&self, query: &str, page: usize) -> Result<SearchResults, Error> {
        self.get_json(
            "/search/issues",
            &[
                ("q", query.to_string()),
                ("sort", "merged".to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ],
            "searching for merged pull requests",
        )
        .await
    }
}
