use crate::helpers::*;

#[tokio::test(flavor = "multi_thread")]
async fn nothing_merged() {
    let case = TestCase::new(file!()).await;
    mount_search(case.server(), SEARCH_PREFIX, Vec::new()).await;

    case.run();
}

/// The changelog is never read when there is nothing to add.
#[tokio::test(flavor = "multi_thread")]
async fn missing_changelog_is_fine() {
    let case = TestCase::new(file!())
        .await
        .arg("--changelog")
        .arg("does/not/exist.yaml");
    mount_search(case.server(), SEARCH_PREFIX, Vec::new()).await;

    case.run();
}
