//! cli
//!
//! Command-line interface layer for yamlnorm.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging
//! - Delegate to command handlers
//! - Does NOT touch the filesystem directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, resolves
//! configuration, and dispatches to the [`crate::engine`] for execution.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::ui::output::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.debug);
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    commands::dispatch(cli.command, verbosity)
}

/// Install the stderr log subscriber.
///
/// `--debug` enables debug events for this crate; otherwise `RUST_LOG`
/// is honored, falling back to warnings only.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("yamlnorm=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("yamlnorm=warn"))
    };

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
