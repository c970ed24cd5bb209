use crate::helpers::*;

#[tokio::test(flavor = "multi_thread")]
async fn dry_run() {
    let case = TestCase::new(file!()).await.arg("--dry-run");
    mount_search(
        case.server(),
        SEARCH_PREFIX,
        vec![pull_request(3, "New title", &["minor"])],
    )
    .await;

    let working_dir = case.arrange();
    case.act(&working_dir)
        .success()
        .stdout_eq(snapbox::str![[r#"
...
[..]Would write the following to changelogs/changelog.yaml:
  "1.1.0":
    changes:
      minor_changes:
      - New title (https://github.com/owner/repo/pull/3)
...
"#]]);
    case.assert(&working_dir);
}
