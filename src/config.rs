//! Run configuration resolved from the command line.

use crate::cli::Cli;
use crate::error::{Result, SyncError};
use std::path::PathBuf;

/// How the final report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for a single sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Directory that must be the root of a git working tree.
    pub repo: PathBuf,
    /// Remote label whose branches are mirrored (default: "origin").
    pub remote: String,
    pub output: OutputFormat,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            repo: PathBuf::from("."),
            remote: default_remote(),
            output: OutputFormat::Text,
        }
    }
}

pub(crate) fn default_remote() -> String {
    "origin".to_string()
}

impl SyncConfig {
    /// Build and validate the configuration from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Self {
            repo: cli.repo.clone(),
            remote: cli.remote.clone(),
            output: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    ///
    /// The remote label is matched against the part of `git branch -r`
    /// entries before the first `/`, so it can hold neither a slash nor
    /// whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.remote.is_empty() {
            return Err(SyncError::InvalidConfig(
                "remote name must not be empty".to_string(),
            ));
        }
        if self.remote.contains('/') || self.remote.contains(char::is_whitespace) {
            return Err(SyncError::InvalidConfig(format!(
                "remote name '{}' must not contain '/' or whitespace",
                self.remote
            )));
        }
        Ok(())
    }
}
