use camino::{Utf8Path, Utf8PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A throwaway git repository on disk.
///
/// Helpers panic on failure: they are for tests only. The initial branch is always
/// `master` regardless of the user's `init.defaultBranch`.
pub struct GitFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl GitFixture {
    /// Empty repository with an identity configured and one empty commit on `master`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let canonical = dir.path().canonicalize().expect("canonicalize temp dir");
        let root = Utf8PathBuf::from_path_buf(canonical).expect("temp dir is UTF-8");

        let fixture = Self { _dir: dir, root };
        fixture.git(&["init", "--quiet"]);
        fixture.git(&["symbolic-ref", "HEAD", "refs/heads/master"]);
        fixture.git(&["config", "user.name", "test-user"]);
        fixture.git(&["config", "user.email", "test@example.com"]);
        fixture.git(&["config", "commit.gpgsign", "false"]);
        fixture.git(&["commit", "--quiet", "--allow-empty", "-m", "initial"]);
        fixture
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> Utf8PathBuf {
        self.root.join(rel)
    }

    /// Run git in the repository root and return trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .expect("spawn git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, contents).expect("write fixture file");
    }

    pub fn remove(&self, rel: &str) {
        std::fs::remove_file(self.path(rel)).expect("remove fixture file");
    }

    /// Stage everything and commit.
    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "--quiet", "--allow-empty", "-m", message]);
    }

    pub fn commit_file(&self, rel: &str, contents: &str, message: &str) {
        self.write(rel, contents);
        self.commit_all(message);
    }

    /// `n` empty commits on the current branch.
    pub fn empty_commits(&self, n: usize) {
        for i in 0..n {
            self.git(&["commit", "--quiet", "--allow-empty", "-m", &format!("step {i}")]);
        }
    }

    /// Create `name` at the current commit without switching to it.
    pub fn branch(&self, name: &str) {
        self.git(&["branch", name]);
    }

    pub fn checkout(&self, name: &str) {
        self.git(&["checkout", "--quiet", name]);
    }

    pub fn checkout_new(&self, name: &str) {
        self.git(&["checkout", "--quiet", "-b", name]);
    }

    /// Make the current branch track `upstream` (a local branch or `origin/<name>`).
    pub fn set_upstream(&self, upstream: &str) {
        self.git(&["branch", "--quiet", &format!("--set-upstream-to={upstream}")]);
    }

    /// Create `refs/remotes/origin/<name>` at `target` without any network access.
    pub fn remote_branch(&self, name: &str, target: &str) {
        self.remote_branch_on("origin", name, target);
    }

    /// Create `refs/remotes/<remote>/<name>` at `target`, adding `remote` if needed.
    pub fn remote_branch_on(&self, remote: &str, name: &str, target: &str) {
        let remotes = self.git(&["remote"]);
        if !remotes.lines().any(|r| r == remote) {
            self.git(&["remote", "add", remote, self.root.as_str()]);
        }
        self.git(&["update-ref", &format!("refs/remotes/{remote}/{name}"), target]);
    }

    pub fn head_sha(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}
