//! config command - Show the effective configuration

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::ui::output;

/// List all configuration values with precedence applied.
pub fn list(root: Option<&Path>) -> Result<()> {
    let config = Config::load(root).context("Failed to load configuration")?;

    println!("# Effective Configuration");
    println!("root = {}", config.root().display());
    println!("policy = {}", config.policy());
    println!("skip_dirs = [{}]", config.skip_dirs().join(", "));
    println!("follow_symlinks = {}", config.follow_symlinks());

    println!();
    println!("# Sources");
    let sources: Vec<String> = [
        config.global_config_loaded_from(),
        config.project_config_loaded_from(),
    ]
    .into_iter()
    .flatten()
    .map(|p| p.display().to_string())
    .collect();
    if sources.is_empty() {
        println!("(defaults only)");
    } else {
        println!("{}", output::format_list(&sources, ""));
    }

    Ok(())
}
