//! Git command runner for branchsync.
//!
//! Provides a wrapper around git commands with captured stdout/stderr and
//! structured error handling, plus the [`Git`] trait the syncer talks to.
//! All git operations should go through this module.

use crate::error::{Result, SyncError};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, trace};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trailing whitespace trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    /// Create a new GitOutput from raw output bytes.
    ///
    /// Only the end of stdout is trimmed so the first `git branch` line keeps
    /// its two-column marker like every other line.
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Arguments
///
/// * `cwd` - The working directory to run the command in
/// * `args` - The git command arguments (without "git" prefix)
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(SyncError::Command)` - On non-zero exit code, carrying stderr
/// * `Err(SyncError::Spawn)` - If git could not be started
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    let command = args.join(" ");
    debug!(cwd = %cwd.display(), "running git {}", command);

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|source| SyncError::Spawn {
            command: command.clone(),
            source,
        })?;

    let git_output = GitOutput::from_output(&output);
    trace!(stdout = %git_output.stdout, stderr = %git_output.stderr, "git {} finished", command);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        debug!(exit_code, "git {} exited non-zero", command);
        let stderr = if git_output.stderr.is_empty() {
            git_output.stdout.trim().to_string()
        } else {
            git_output.stderr
        };
        Err(SyncError::Command { command, stderr })
    }
}

/// The git operations the branch syncer needs.
///
/// Listing methods return raw stdout; parsing lives in
/// [`crate::branches`].
pub trait Git {
    /// `git fetch --all`
    fn fetch_all(&self) -> Result<()>;

    /// `git branch -r --no-color`
    fn list_remote_branches(&self) -> Result<String>;

    /// `git branch --no-color`
    fn list_local_branches(&self) -> Result<String>;

    /// `git checkout -b <name> <remote_ref>`
    fn create_tracking_branch(&self, name: &str, remote_ref: &str) -> Result<()>;

    /// `git checkout <name>`
    fn checkout(&self, name: &str) -> Result<()>;
}

/// [`Git`] implementation backed by the `git` binary.
#[derive(Debug, Clone)]
pub struct SystemGit {
    repo_root: PathBuf,
}

impl SystemGit {
    pub fn new<P: Into<PathBuf>>(repo_root: P) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

impl Git for SystemGit {
    fn fetch_all(&self) -> Result<()> {
        run_git(&self.repo_root, &["fetch", "--all"])?;
        Ok(())
    }

    fn list_remote_branches(&self) -> Result<String> {
        Ok(run_git(&self.repo_root, &["branch", "-r", "--no-color"])?.stdout)
    }

    fn list_local_branches(&self) -> Result<String> {
        Ok(run_git(&self.repo_root, &["branch", "--no-color"])?.stdout)
    }

    fn create_tracking_branch(&self, name: &str, remote_ref: &str) -> Result<()> {
        run_git(&self.repo_root, &["checkout", "-b", name, remote_ref])?;
        Ok(())
    }

    fn checkout(&self, name: &str) -> Result<()> {
        run_git(&self.repo_root, &["checkout", name])?;
        Ok(())
    }
}

/// Check that `dir` is the root of a git working tree.
///
/// Looks only for the `.git` entry (a directory, or a file for linked
/// worktrees and submodules); no git command is run.
///
/// # Returns
///
/// * `Ok(())` - `.git` exists in `dir`
/// * `Err(SyncError::NotARepository)` - otherwise
pub fn ensure_repo_root<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    if dir.join(".git").exists() {
        Ok(())
    } else {
        Err(SyncError::NotARepository(dir.to_path_buf()))
    }
}
