//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves configuration and builds an engine context
//! 2. Calls the engine to run the pass
//! 3. Formats and displays output
//!
//! Handlers do NOT touch the filesystem directly.

mod check;
mod completion;
mod config_cmd;
mod fix;

// Re-export command functions for testing and direct invocation
pub use check::check;
pub use completion::completion;
pub use config_cmd::list as config_list;
pub use fix::fix;

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction, TreeArgs};
use crate::core::config::Config;
use crate::engine::Context;
use crate::ui::output::Verbosity;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, verbosity: Verbosity) -> Result<()> {
    match command {
        Command::Fix { tree, dry_run } => fix::fix(&tree, dry_run, verbosity),
        Command::Check { tree, json } => check::check(&tree, json, verbosity),
        Command::Config { action } => match action {
            ConfigAction::List { root } => config_cmd::list(root.as_deref()),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Build an engine context from configuration and tree arguments.
///
/// CLI flags override configuration.
pub fn context_for(tree: &TreeArgs) -> Result<Context> {
    let config = Config::load(tree.root.as_deref()).context("Failed to load configuration")?;
    let mut ctx = Context::from_config(&config);
    if let Some(policy) = tree.policy {
        ctx.policy = policy.into();
    }
    Ok(ctx)
}
