//! Parsers for `git branch -r` and `git branch` output.
//!
//! Both listings are line oriented with a two-column marker prefix:
//!
//! ```text
//!   origin/HEAD -> origin/main        * main
//!   origin/feature-x                  + other-worktree
//!   origin/main                         feature-x
//! ```
//!
//! Each line is parsed on its own; lines that do not fit the expected
//! shape are skipped with a warning rather than failing the whole listing.

use tracing::{debug, warn};

/// A branch on a remote, as seen through its remote-tracking ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBranch {
    /// Remote label, e.g. `origin`.
    pub remote: String,
    /// Short branch name with the remote label stripped, e.g. `feature-x`.
    pub name: String,
}

impl RemoteBranch {
    /// The remote-tracking ref, e.g. `origin/feature-x`.
    pub fn tracking_ref(&self) -> String {
        format!("{}/{}", self.remote, self.name)
    }
}

/// A branch in the local repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBranch {
    pub name: String,
    /// Whether the listing marked this branch as checked out (`* `).
    pub current: bool,
}

/// Outcome of parsing a single remote listing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteLine {
    Branch(RemoteBranch),
    /// The symbolic `<remote>/HEAD` pointer.
    SymbolicHead,
    Blank,
    Malformed(String),
}

/// Parse one line of `git branch -r`.
pub fn parse_remote_line(line: &str) -> RemoteLine {
    let line = line.trim();
    if line.is_empty() {
        return RemoteLine::Blank;
    }
    if line.contains(" -> ") {
        return RemoteLine::SymbolicHead;
    }
    if line.contains(char::is_whitespace) {
        return RemoteLine::Malformed(line.to_string());
    }

    match line.split_once('/') {
        Some((remote, name)) if !remote.is_empty() && !name.is_empty() => {
            if name == "HEAD" {
                RemoteLine::SymbolicHead
            } else {
                RemoteLine::Branch(RemoteBranch {
                    remote: remote.to_string(),
                    name: name.to_string(),
                })
            }
        }
        _ => RemoteLine::Malformed(line.to_string()),
    }
}

/// Parse `git branch -r` output into the branches of `remote`.
///
/// Listing order is preserved; a name listed twice is kept once. Entries
/// of other remotes are ignored.
pub fn parse_remote_listing(listing: &str, remote: &str) -> Vec<RemoteBranch> {
    let mut branches: Vec<RemoteBranch> = Vec::new();

    for line in listing.lines() {
        match parse_remote_line(line) {
            RemoteLine::Branch(branch) if branch.remote == remote => {
                if !branches.iter().any(|b| b.name == branch.name) {
                    branches.push(branch);
                }
            }
            RemoteLine::Branch(branch) => {
                debug!(remote = %branch.remote, "skipping branch of other remote: {}", branch.name);
            }
            RemoteLine::SymbolicHead | RemoteLine::Blank => {}
            RemoteLine::Malformed(raw) => {
                warn!("skipping unrecognized remote branch line: {:?}", raw);
            }
        }
    }

    branches
}

/// Parse one line of `git branch`.
///
/// Returns `None` for blank lines and for detached-HEAD entries such as
/// `* (HEAD detached at 1a2b3c4)`, which name no branch.
pub fn parse_local_line(line: &str) -> Option<LocalBranch> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (current, name) = match trimmed.strip_prefix("* ") {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix("+ ").unwrap_or(trimmed)),
    };
    let name = name.trim();

    if name.starts_with('(') {
        debug!("skipping detached HEAD entry: {}", name);
        return None;
    }
    if name.is_empty() || name.contains(char::is_whitespace) {
        warn!("skipping unrecognized local branch line: {:?}", trimmed);
        return None;
    }

    Some(LocalBranch {
        name: name.to_string(),
        current,
    })
}

/// Parse `git branch` output, preserving listing order.
pub fn parse_local_listing(listing: &str) -> Vec<LocalBranch> {
    listing.lines().filter_map(parse_local_line).collect()
}
