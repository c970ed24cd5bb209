use std::path::{Path, PathBuf};

use snapbox::cmd::{cargo_bin, Command, OutputAssert};
use tempfile::TempDir;
use wiremock::MockServer;

use crate::helpers::{assert_subset, copy_dir_contents};

/// Variables which would otherwise leak in from a CI runner.
pub const ENV: &[&str] = &[
    "GITHUB_REPOSITORY",
    "GITHUB_TOKEN",
    "GITHUB_API_URL",
    "SINCE_VERSION",
    "TO_VERSION",
    "CHANGELOG_PATH",
    "PRLOG_CONFIG",
    "MAJOR_CHANGES_LABELS",
    "MINOR_CHANGES_LABELS",
    "BREAKING_CHANGES_LABELS",
    "DEPRECATED_FEATURES_LABELS",
    "REMOVED_FEATURES_LABELS",
    "SECURITY_FIXES_LABELS",
    "BUGFIXES_LABELS",
    "SKIP_CHANGELOG_LABELS",
    "RUST_LOG",
];

pub struct TestCase {
    file_name: &'static str,
    server: MockServer,
    args: Vec<String>,
}

impl TestCase {
    /// Create a new `TestCase` with its own fake GitHub. `file_name` should be `file!()`.
    pub async fn new(file_name: &'static str) -> Self {
        Self {
            file_name,
            server: MockServer::start().await,
            args: Vec::new(),
        }
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// A temporary directory with the contents of the `in` directory.
    pub fn arrange(&self) -> TempDir {
        let working_dir = tempfile::tempdir().unwrap();
        let in_dir = self.in_dir();
        if in_dir.exists() {
            copy_dir_contents(&in_dir, working_dir.path());
        }
        working_dir
    }

    pub fn act(&self, working_dir: &TempDir) -> OutputAssert {
        let mut command = Command::new(cargo_bin!("prlog")).current_dir(working_dir.path());
        for key in ENV {
            command = command.env_remove(key);
        }
        command
            .args(["--repository", "owner/repo", "--api-url"])
            .arg(self.server.uri())
            .args(&self.args)
            .assert()
    }

    /// Files in `out` (or `in`, if nothing should change) must match the working directory.
    pub fn assert(&self, working_dir: &TempDir) {
        let out_dir = self.data_path().join("out");
        let expected = if out_dir.exists() {
            out_dir
        } else {
            self.in_dir()
        };
        assert_subset(&expected, working_dir.path());
    }

    /// Runs `.arrange()`, `.act()`, and `.assert()`, expecting success.
    pub fn run(&self) {
        let working_dir = self.arrange();
        self.act(&working_dir).success();
        self.assert(&working_dir);
    }

    /// `file!()` is relative to the workspace, so only the name of the case directory is used.
    fn data_path(&self) -> PathBuf {
        let case = Path::new(self.file_name)
            .parent()
            .and_then(Path::file_name)
            .unwrap();
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join(case)
    }

    fn in_dir(&self) -> PathBuf {
        self.data_path().join("in")
    }
}
