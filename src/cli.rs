//! CLI argument parsing for branchsync.
//!
//! Uses clap derive macros for declarative argument definitions. Every flag
//! is optional: a bare `branchsync` syncs `origin` into the current directory.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Create a local tracking branch for every branch on a git remote.
///
/// Fetches all remotes, creates `<branch>` tracking `<remote>/<branch>` for
/// each remote branch missing locally, switches back to `main` (or `master`)
/// and prints a summary. Existing local branches are never modified.
#[derive(Parser, Debug)]
#[command(name = "branchsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Repository root to operate on.
    #[arg(short = 'C', long = "repo", value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,

    /// Remote whose branches are mirrored locally.
    #[arg(short, long, value_name = "NAME", default_value = "origin")]
    pub remote: String,

    /// Print the final report as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["branchsync"]).unwrap();
        assert_eq!(cli.repo, PathBuf::from("."));
        assert_eq!(cli.remote, "origin");
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn parse_repo_and_remote() {
        let cli =
            Cli::try_parse_from(["branchsync", "-C", "/work/app", "--remote", "upstream"]).unwrap();
        assert_eq!(cli.repo, PathBuf::from("/work/app"));
        assert_eq!(cli.remote, "upstream");
    }

    #[test]
    fn parse_json_flag() {
        let cli = Cli::try_parse_from(["branchsync", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn parse_repeated_verbose() {
        let cli = Cli::try_parse_from(["branchsync", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["branchsync", "-v", "-q"]).is_err());
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["branchsync", "extra"]).is_err());
    }
}
