use crate::helpers::*;

/// Releases which can't be found leave the window open on that side.
#[tokio::test(flavor = "multi_thread")]
async fn unknown_release() {
    let case = TestCase::new(file!())
        .await
        .arg("--since-version")
        .arg("v0.0.1")
        .arg("--to-version")
        .arg("v9.0.0");
    mount_search(
        case.server(),
        SEARCH_PREFIX,
        vec![pull_request(2, "Initial import", &[])],
    )
    .await;

    case.run();
}
