//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::policy::Policy;

/// yamlnorm - Validate YAML definition files and rename them to match their content
#[derive(Parser, Debug)]
#[command(name = "yamlnorm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Arguments shared by commands that walk a tree.
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Root directory to process (defaults to config `root`, then the current directory)
    #[arg(env = "YAMLNORM_ROOT")]
    pub root: Option<PathBuf>,

    /// Filename policy (overrides configuration)
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate every YAML file and rename it to match its content
    #[command(
        name = "fix",
        long_about = "Validate every YAML file under the root and rename it to match its content.\n\n\
            Each file must declare a name (or title) and a major.minor.patch version. \
            Files under .github are never touched. The run stops at the first invalid \
            file.\n\n\
            With the versioned policy, every run also bumps each file's patch version \
            and renames it accordingly, so repeated runs keep advancing versions.",
        after_help = "\
EXAMPLES:
    # Normalize the current directory
    yamlnorm fix

    # Preview without touching anything
    yamlnorm fix definitions --dry-run

    # Use {name}-{version}.yaml names and bump versions
    yamlnorm fix definitions --policy versioned"
    )]
    Fix {
        #[command(flatten)]
        tree: TreeArgs,

        /// Show what would be done without making changes
        #[arg(long)]
        dry_run: bool,
    },

    /// Report what fix would change; exit non-zero if anything would
    #[command(
        name = "check",
        long_about = "Validate every YAML file and report what `fix` would change.\n\n\
            Exits non-zero if any file is invalid, would be renamed or rewritten, or if \
            the library files are missing or duplicated. Nothing is modified.",
        after_help = "\
EXAMPLES:
    # Gate a CI job
    yamlnorm check definitions

    # Machine-readable plan
    yamlnorm check definitions --json"
    )]
    Check {
        #[command(flatten)]
        tree: TreeArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// List the effective configuration values
    List {
        /// Root directory whose project config should be included
        #[arg(env = "YAMLNORM_ROOT")]
        root: Option<PathBuf>,
    },
}

/// Filename policy
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    /// {name}.lib.yaml or {name}.{tree|wflow|lut}.yaml
    Classify,
    /// {name}-{version}.yaml, bumping the patch version on every run
    Versioned,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Classify => Policy::Classify,
            PolicyArg::Versioned => Policy::Versioned,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_fix_with_policy() {
        let cli = Cli::try_parse_from(["yamlnorm", "fix", "defs", "--policy", "versioned", "--dry-run"])
            .unwrap();
        match cli.command {
            Command::Fix { tree, dry_run } => {
                assert_eq!(tree.root, Some(PathBuf::from("defs")));
                assert_eq!(tree.policy, Some(PolicyArg::Versioned));
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["yamlnorm", "check", "--json", "-q", "--debug"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.debug);
    }

    #[test]
    fn unknown_policy_rejected() {
        assert!(Cli::try_parse_from(["yamlnorm", "fix", "--policy", "random"]).is_err());
    }
}
