//! Exit code constants for the branchsync CLI.
//!
//! - 0: Success
//! - 1: Failure (not a repository, git command failed, no remote branches)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Any failure that aborted the sync before reconciliation finished.
pub const FAILURE: i32 = 1;
