use crate::helpers::*;

#[tokio::test(flavor = "multi_thread")]
async fn up_to_date() {
    let case = TestCase::new(file!()).await;
    mount_search(
        case.server(),
        SEARCH_PREFIX,
        vec![
            pull_request(4, "Fix parsing of empty lists", &["bugfix"]),
            pull_request(5, "Release tooling", &["skip_changelog"]),
        ],
    )
    .await;

    case.run();
}
