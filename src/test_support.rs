use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A repository on `main` with a single commit and no remotes.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

/// An upstream repository carrying `main` plus `branches`, and a clone of it.
///
/// Returns `(upstream, clone)`. The clone has `origin` pointing at the
/// upstream and only `main` checked out locally.
pub(crate) fn create_test_clone(branches: &[&str]) -> (TempDir, TempDir) {
    let upstream = create_test_repo();
    for branch in branches {
        add_branch(upstream.path(), branch);
    }

    let clone = TempDir::new().unwrap();
    let upstream_str = upstream.path().to_string_lossy().to_string();
    git(clone.path(), &["clone", "--quiet", &upstream_str, "."]);

    (upstream, clone)
}

/// Create `branch` in `repo` with one commit of its own, then return to `main`.
pub(crate) fn add_branch(repo: &Path, branch: &str) {
    git(repo, &["checkout", "--quiet", "-b", branch, "main"]);
    let file = format!("{}.txt", branch.replace('/', "-"));
    std::fs::write(repo.join(&file), format!("{}\n", branch)).unwrap();
    git(repo, &["add", "."]);
    git(repo, &["commit", "-m", &format!("Add {}", branch)]);
    git(repo, &["checkout", "--quiet", "main"]);
}

/// Names of the local branches in `repo`, sorted.
pub(crate) fn local_branch_names(repo: &Path) -> Vec<String> {
    let output = git(repo, &["for-each-ref", "--format=%(refname:short)", "refs/heads"]);
    let mut names: Vec<String> = output.lines().map(str::to_string).collect();
    names.sort();
    names
}

pub(crate) fn current_branch(repo: &Path) -> String {
    git(repo, &["rev-parse", "--abbrev-ref", "HEAD"]).trim().to_string()
}

fn git(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }

    String::from_utf8_lossy(&output.stdout).to_string()
}
