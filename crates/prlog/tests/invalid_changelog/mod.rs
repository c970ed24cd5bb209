use crate::helpers::*;

#[tokio::test(flavor = "multi_thread")]
async fn invalid_changelog() {
    let case = TestCase::new(file!()).await;
    mount_search(
        case.server(),
        SEARCH_PREFIX,
        vec![pull_request(1, "Anything", &[])],
    )
    .await;

    let working_dir = case.arrange();
    case.act(&working_dir).failure();
    case.assert(&working_dir);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_repository() {
    let case = TestCase::new(file!()).await;
    let working_dir = case.arrange();

    snapbox::cmd::Command::new(snapbox::cmd::cargo_bin!("prlog"))
        .current_dir(working_dir.path())
        .env_remove("GITHUB_REPOSITORY")
        .env_remove("PRLOG_CONFIG")
        .assert()
        .failure();
}
