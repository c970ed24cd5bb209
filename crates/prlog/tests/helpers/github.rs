use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const SEARCH_PREFIX: &str = "repo:owner/repo is:pr is:merged sort:author-date-asc";

/// One item of a search response.
pub fn pull_request(number: u64, title: &str, labels: &[&str]) -> Value {
    json!({
        "title": title,
        "number": number,
        "html_url": format!("https://github.com/owner/repo/pull/{number}"),
        "labels": labels.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>(),
    })
}

/// Answer the search for merged pull requests whose query is exactly `query`.
pub async fn mount_search(server: &MockServer, query: &str, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": items.len(),
            "incomplete_results": false,
            "items": items,
        })))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_latest_release(server: &MockServer, tag: &str, published_at: &str) {
    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "tag_name": tag,
            "published_at": published_at,
        })))
        .expect(1)
        .mount(server)
        .await;
}
