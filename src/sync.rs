//! The branch sync workflow.
//!
//! A run is a straight pipeline:
//!
//! 1. Preflight: the target directory must hold `.git`
//! 2. `git fetch --all`
//! 3. List remote branches of the configured remote
//! 4. List local branches
//! 5. Create a tracking branch for every remote branch missing locally
//! 6. Check out `main` (or `master`)
//! 7. List local branches again for the report
//!
//! Steps 1-4 abort the run on failure, as does an empty remote listing.
//! From step 5 on nothing is fatal: a branch that fails to be created is
//! recorded and the loop moves on.

use crate::branches::{RemoteBranch, parse_local_listing, parse_remote_listing};
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::git::{Git, SystemGit, ensure_repo_root};
use crate::report::{FailedBranch, SyncReport, Tally};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Primary branch used when the remote has no `main`.
pub const FALLBACK_PRIMARY_BRANCH: &str = "master";

/// Preferred primary branch.
pub const PRIMARY_BRANCH: &str = "main";

/// Pick the branch to return to once reconciliation is done.
///
/// `main` when the remote has it, otherwise `master`, whether or not a
/// `master` exists anywhere.
pub fn primary_branch(remote_branches: &[RemoteBranch]) -> &'static str {
    if remote_branches.iter().any(|b| b.name == PRIMARY_BRANCH) {
        PRIMARY_BRANCH
    } else {
        FALLBACK_PRIMARY_BRANCH
    }
}

/// Per-branch outcome of the reconcile step.
#[derive(Debug, Default)]
pub struct Reconciliation {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<FailedBranch>,
}

impl Reconciliation {
    pub fn tally(&self) -> Tally {
        Tally::of(&self.created, &self.skipped, &self.failed)
    }
}

/// Drives the sync workflow against a [`Git`] implementation.
pub struct BranchSyncer<G: Git> {
    git: G,
    remote: String,
    /// Print progress lines to stdout.
    echo: bool,
}

impl<G: Git> BranchSyncer<G> {
    pub fn new(git: G, remote: impl Into<String>) -> Self {
        Self {
            git,
            remote: remote.into(),
            echo: true,
        }
    }

    /// Suppress progress output (the report is still returned).
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    fn say(&self, line: impl AsRef<str>) {
        if self.echo {
            println!("{}", line.as_ref());
        }
    }

    /// Run steps 2-7. The caller is responsible for the preflight check.
    pub fn run(&self) -> Result<SyncReport> {
        self.say("Fetching all remotes...");
        self.git.fetch_all()?;

        let remote_branches = self.remote_branches()?;
        if remote_branches.is_empty() {
            warn!(remote = %self.remote, "no remote branches found");
            self.say(format!("Warning: no branches found on remote '{}'", self.remote));
            return Err(SyncError::NoRemoteBranches(self.remote.clone()));
        }

        self.say(format!("\nRemote branches on '{}':", self.remote));
        for branch in &remote_branches {
            self.say(format!("  {}", branch.name));
        }

        let local_names = self.local_branch_names()?;
        let local_branches_before = local_names.len();

        self.say(format!(
            "\nCreating local branches for {} remote branch(es)...",
            remote_branches.len()
        ));
        let reconciliation = self.reconcile(&remote_branches, &local_names);

        let checkout_target = primary_branch(&remote_branches);
        self.say(format!("\nSwitching back to {}...", checkout_target));
        let checkout_succeeded = match self.git.checkout(checkout_target) {
            Ok(()) => true,
            Err(e) => {
                warn!("could not check out {}: {}", checkout_target, e);
                false
            }
        };

        let local_branches_after = match self.git.list_local_branches() {
            Ok(listing) => listing
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| line.trim_end().to_string())
                .collect(),
            Err(e) => {
                warn!("could not list local branches for the report: {}", e);
                Vec::new()
            }
        };

        let tally = reconciliation.tally();
        info!(
            created = tally.created,
            skipped = tally.skipped,
            failed = tally.failed,
            "sync finished"
        );

        Ok(SyncReport {
            remote: self.remote.clone(),
            remote_branches: remote_branches.into_iter().map(|b| b.name).collect(),
            created: reconciliation.created,
            skipped: reconciliation.skipped,
            failed: reconciliation.failed,
            checkout_target: checkout_target.to_string(),
            checkout_succeeded,
            local_branches_before,
            local_branches_after,
        })
    }

    /// Fetched branches of the configured remote, in listing order.
    pub fn remote_branches(&self) -> Result<Vec<RemoteBranch>> {
        let listing = self.git.list_remote_branches()?;
        Ok(parse_remote_listing(&listing, &self.remote))
    }

    /// Names of the branches currently in the local repository.
    pub fn local_branch_names(&self) -> Result<HashSet<String>> {
        let listing = self.git.list_local_branches()?;
        let branches = parse_local_listing(&listing);
        if let Some(current) = branches.iter().find(|b| b.current) {
            debug!("currently on {}", current.name);
        }
        Ok(branches.into_iter().map(|b| b.name).collect())
    }

    /// Create a tracking branch for each remote branch missing locally.
    ///
    /// Branches already present are skipped. A failed creation is recorded
    /// under `failed` only.
    pub fn reconcile(
        &self,
        remote_branches: &[RemoteBranch],
        local_names: &HashSet<String>,
    ) -> Reconciliation {
        let mut result = Reconciliation::default();

        for branch in remote_branches {
            if local_names.contains(&branch.name) {
                debug!("{} already exists locally", branch.name);
                self.say(format!("  = {} already exists locally", branch.name));
                result.skipped.push(branch.name.clone());
                continue;
            }

            let tracking_ref = branch.tracking_ref();
            match self.git.create_tracking_branch(&branch.name, &tracking_ref) {
                Ok(()) => {
                    self.say(format!("  + {} created from {}", branch.name, tracking_ref));
                    result.created.push(branch.name.clone());
                }
                Err(e) => {
                    warn!("failed to create {}: {}", branch.name, e);
                    self.say(format!("  ! {} could not be created", branch.name));
                    result.failed.push(FailedBranch {
                        name: branch.name.clone(),
                        error: failure_detail(e),
                    });
                }
            }
        }

        result
    }
}

fn failure_detail(err: SyncError) -> String {
    match err {
        SyncError::Command { stderr, .. } => stderr,
        other => other.to_string(),
    }
}

/// Preflight the configured repository, then run the sync with the git binary.
pub fn sync_repository(config: &SyncConfig, echo: bool) -> Result<SyncReport> {
    ensure_repo_root(&config.repo)?;

    let syncer = BranchSyncer::new(SystemGit::new(&config.repo), config.remote.clone());
    let syncer = if echo { syncer } else { syncer.quiet() };
    syncer.run()
}
