use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::*;

#[tokio::test(flavor = "multi_thread")]
async fn config_file() {
    let case = TestCase::new(file!()).await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/releases/tags/v0.1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 41,
            "tag_name": "v0.1.0",
            "published_at": "2024-02-01T09:00:00Z",
        })))
        .expect(1)
        .mount(case.server())
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/releases/41"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 41,
            "tag_name": "v0.1.0",
            "published_at": "2024-02-01T09:00:00Z",
        })))
        .expect(1)
        .mount(case.server())
        .await;
    mount_search(
        case.server(),
        &format!("{SEARCH_PREFIX} merged:>=2024-02-01T09:00:00Z"),
        vec![
            pull_request(10, "Add export", &["enhancement"]),
            pull_request(11, "Handle timeouts", &["bug"]),
            pull_request(12, "Internal cleanup", &["no-changelog", "bug"]),
            pull_request(13, "Refactor", &["major"]),
        ],
    )
    .await;

    case.run();
}
