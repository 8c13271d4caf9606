//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr so stdout carries only the progress lines and
//! the report. `RUST_LOG` overrides the level picked from `-v`/`-q`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Default filter directive for the given verbosity flags.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "branchsync=error";
    }
    match verbose {
        0 => "branchsync=warn",
        1 => "branchsync=debug",
        _ => "branchsync=trace",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}
