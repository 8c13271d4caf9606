//! Run tally and the final summary.

use serde::Serialize;

/// Counters for a run, always derived from the per-branch lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Tally {
    pub fn of(created: &[String], skipped: &[String], failed: &[FailedBranch]) -> Self {
        Self {
            created: created.len(),
            skipped: skipped.len(),
            failed: failed.len(),
        }
    }
}

/// A branch whose creation failed, with git's error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedBranch {
    pub name: String,
    pub error: String,
}

/// Everything a completed sync has to say about itself.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub remote: String,
    pub remote_branches: Vec<String>,
    pub created: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<FailedBranch>,
    /// Branch the run switched back to at the end.
    pub checkout_target: String,
    pub checkout_succeeded: bool,
    /// Local branch count before reconciliation started.
    pub local_branches_before: usize,
    /// `git branch` lines as printed after the run. Empty when the final
    /// listing could not be read.
    pub local_branches_after: Vec<String>,
}

/// JSON shape of the report: the report fields plus the derived tally.
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a SyncReport,
    tally: Tally,
}

impl SyncReport {
    pub fn tally(&self) -> Tally {
        Tally::of(&self.created, &self.skipped, &self.failed)
    }

    /// Render the closing summary shown in text mode, set off from the
    /// progress lines by a blank line.
    pub fn render_text(&self) -> String {
        let tally = self.tally();
        let mut out = String::from("\n");

        out.push_str("Local branches:\n");
        for line in &self.local_branches_after {
            out.push_str(&format!("  {}\n", line));
        }
        out.push('\n');

        out.push_str("Done.\n");
        out.push_str(&format!("  {:>3} branch(es) created\n", tally.created));
        out.push_str(&format!("  {:>3} branch(es) already present\n", tally.skipped));
        if tally.failed > 0 {
            out.push_str(&format!("  {:>3} branch(es) failed\n", tally.failed));
        }
        out.push_str(&format!(
            "  {:>3} local branch(es) before sync\n",
            self.local_branches_before
        ));

        out
    }

    /// Render the report as pretty-printed JSON.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&JsonReport {
            report: self,
            tally: self.tally(),
        })
    }
}
