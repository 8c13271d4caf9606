//! Error types for the branchsync CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for branchsync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The target directory is not the root of a git working tree.
    #[error(
        "no git repository found at {}. Run branchsync from the root of a git working tree.",
        .0.display()
    )]
    NotARepository(PathBuf),

    /// A command-line setting is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A git command ran but exited non-zero.
    #[error("git {command} failed: {stderr}")]
    Command { command: String, stderr: String },

    /// The git binary could not be executed.
    #[error("failed to execute git {command}: {source} (is git installed?)")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The remote listing had no usable branches for the configured remote.
    #[error("no remote branches found for remote '{0}'")]
    NoRemoteBranches(String),

    /// The JSON report could not be rendered.
    #[error("failed to render report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SyncError {
    /// Returns the exit code for this error.
    ///
    /// Every aborting failure exits with the same code; the variants exist
    /// for messages and for tests, not for callers to branch on.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::NotARepository(_)
            | SyncError::InvalidConfig(_)
            | SyncError::Command { .. }
            | SyncError::Spawn { .. }
            | SyncError::NoRemoteBranches(_)
            | SyncError::Serialize(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for branchsync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
