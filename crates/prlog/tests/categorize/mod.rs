use crate::helpers::*;

#[tokio::test(flavor = "multi_thread")]
async fn categorize() {
    let case = TestCase::new(file!())
        .await
        .arg("--since-version")
        .arg("latest");
    mount_latest_release(case.server(), "v0.9.0", "2024-05-01T00:00:00Z").await;
    mount_search(
        case.server(),
        &format!("{SEARCH_PREFIX} merged:>=2024-05-01T00:00:00Z"),
        vec![
            pull_request(5, "Fix crash on empty input", &["bug"]),
            pull_request(6, "Add --json flag", &["enhancement"]),
            pull_request(7, "Bump dependencies", &["skip_changelog", "major"]),
            pull_request(8, "Update README", &["documentation"]),
            pull_request(9, "Drop the v1 config format", &["removed", "breaking"]),
        ],
    )
    .await;

    case.run();
}
