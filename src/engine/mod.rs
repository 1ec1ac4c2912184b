//! engine
//!
//! Orchestrates a run: Scan -> Plan -> Execute -> Verify.
//!
//! # Architecture
//!
//! 1. **Scan**: Walk the root, prune skipped directories, keep `*.yaml` files
//! 2. **Plan**: Load and validate each record, resolve its target filename,
//!    and produce typed steps (see [`reconcile`])
//! 3. **Execute**: Apply a file's steps before moving to the next file
//! 4. **Verify**: Check the library file invariant on the final names
//!
//! # Invariants
//!
//! - Only the [`Executor`] mutates the filesystem
//! - The first error aborts the run; later files are not touched
//! - A dry run performs the same validation and verification without
//!   executing any step
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use yamlnorm::core::policy::Policy;
//! use yamlnorm::engine::{self, Context};
//!
//! let ctx = Context {
//!     root: PathBuf::from("definitions"),
//!     policy: Policy::Classify,
//!     dry_run: true,
//!     ..Context::default()
//! };
//!
//! let report = engine::run(&ctx)?;
//! println!("{}", report.plan.preview());
//! # Ok::<(), yamlnorm::engine::ReconcileError>(())
//! ```

pub mod exec;
pub mod plan;
pub mod reconcile;
pub mod scan;
pub mod verify;

pub use exec::{Executor, Simulator};
pub use plan::{FilePlan, Plan, PlanStep};
pub use reconcile::{load, plan_file, LoadedRecord};
pub use scan::{scan, ScanOptions};
pub use verify::{count_libraries, verify_libraries, LibraryCounts};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::{Config, DEFAULT_SKIP_DIRS};
use crate::core::policy::Policy;
use crate::core::record::RecordError;
use crate::core::types::TypeError;

/// Execution context for a run.
///
/// Built from configuration and CLI flags; the engine reads no global state.
#[derive(Debug, Clone)]
pub struct Context {
    /// Root directory to walk.
    pub root: PathBuf,
    /// Active filename policy.
    pub policy: Policy,
    /// Directory names whose contents are never read or renamed.
    pub skip_dirs: Vec<String>,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
    /// Plan and verify only; do not touch the filesystem.
    pub dry_run: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            policy: Policy::default(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            follow_symlinks: false,
            dry_run: false,
        }
    }
}

impl Context {
    /// Build a context from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.root().to_path_buf(),
            policy: config.policy(),
            skip_dirs: config.skip_dirs(),
            follow_symlinks: config.follow_symlinks(),
            dry_run: false,
        }
    }

    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            skip_dirs: self.skip_dirs.clone(),
            follow_symlinks: self.follow_symlinks,
        }
    }
}

/// Errors that abort a run.
///
/// Every variant names the offending file (or library file) and a
/// human-readable cause.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The file is not well-formed YAML, or not a mapping.
    #[error("invalid YAML file: {}: {message}", .path.display())]
    InvalidContent { path: PathBuf, message: String },

    /// The record is empty, or lacks a name/title or a version.
    #[error("{reason} in YAML file: {}", .path.display())]
    MissingRequiredFields { path: PathBuf, reason: String },

    /// The name does not normalize, or cannot be classified.
    #[error("{message} in YAML file: {}", .path.display())]
    InvalidName { path: PathBuf, message: String },

    /// The version is not `major.minor.patch`.
    #[error("{message} in YAML file: {}", .path.display())]
    InvalidVersion { path: PathBuf, message: String },

    /// A library file is missing or duplicated after the walk.
    #[error("exactly one {file_name} is required, but found {count}")]
    LibraryFileCount {
        file_name: String,
        count: usize,
        locations: Vec<PathBuf>,
    },

    /// A rename or rewrite would overwrite a different file.
    #[error("cannot move {} to {}: target already exists", .from.display(), .to.display())]
    TargetExists { from: PathBuf, to: PathBuf },

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ReconcileError {
    /// Attach a path to a record loading error.
    pub fn from_record(path: &Path, err: RecordError) -> Self {
        let path = path.to_path_buf();
        match err {
            RecordError::Malformed(message) => Self::InvalidContent { path, message },
            RecordError::Serialize(message) => Self::InvalidContent { path, message },
            RecordError::NotAMapping(_) => Self::InvalidContent {
                path,
                message: err.to_string(),
            },
            RecordError::Empty => Self::MissingRequiredFields {
                path,
                reason: "YAML file is empty or contains only comments".to_string(),
            },
            RecordError::MissingName | RecordError::MissingVersion => {
                Self::MissingRequiredFields {
                    path,
                    reason: "Missing name/title or version".to_string(),
                }
            }
        }
    }

    /// Attach a path to a value validation error.
    pub fn from_type(path: &Path, err: TypeError) -> Self {
        let path = path.to_path_buf();
        match err {
            TypeError::InvalidName(message) => Self::InvalidName {
                path,
                message: format!("Invalid name/title: {message}"),
            },
            TypeError::InvalidVersion(message) => Self::InvalidVersion {
                path,
                message: format!("Invalid version: {message}"),
            },
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Short, stable identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidContent { .. } => "invalid_content",
            Self::MissingRequiredFields { .. } => "missing_required_fields",
            Self::InvalidName { .. } => "invalid_name",
            Self::InvalidVersion { .. } => "invalid_version",
            Self::LibraryFileCount { .. } => "library_file_count",
            Self::TargetExists { .. } => "target_exists",
            Self::Io { .. } => "io",
        }
    }
}

/// Outcome of a complete run.
#[derive(Debug)]
pub struct RunReport {
    /// Everything that was (or, in a dry run, would be) done.
    pub plan: Plan,
    /// Library file counts, when the policy requires them.
    pub libraries: Option<LibraryCounts>,
    /// Whether the plan was applied to the filesystem.
    pub applied: bool,
}

/// Run a full pass over the root.
///
/// Files are processed one at a time in walk order. In a dry run each
/// file is planned but not executed, and the library check runs against
/// the names files would end up with.
///
/// # Errors
///
/// Returns the first [`ReconcileError`] encountered; nothing after it is
/// processed.
pub fn run(ctx: &Context) -> Result<RunReport, ReconcileError> {
    debug!(root = %ctx.root.display(), policy = %ctx.policy, dry_run = ctx.dry_run, "starting run");

    let files = scan(&ctx.root, &ctx.scan_options())?;
    let executor = Executor::new();
    let mut simulator = Simulator::new();
    let mut plan = Plan::new(ctx.root.clone(), ctx.policy);

    for path in files {
        let text = read_text(&path)?;
        let file_plan = plan_file(&path, &text, ctx.policy)?;

        if file_plan.is_noop() {
            debug!(path = %path.display(), "already named correctly");
        } else if ctx.dry_run {
            simulator.apply(&file_plan)?;
        } else {
            executor.apply(&file_plan)?;
        }
        plan.push(file_plan);
    }

    let libraries = if ctx.policy.requires_libraries() {
        let counts = count_libraries(plan.final_paths());
        verify_libraries(&counts)?;
        Some(counts)
    } else {
        None
    };

    info!(
        files = plan.files().len(),
        changed = plan.changed_count(),
        applied = !ctx.dry_run,
        "run complete"
    );

    Ok(RunReport {
        plan,
        libraries,
        applied: !ctx.dry_run,
    })
}

fn read_text(path: &Path) -> Result<String, ReconcileError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => ReconcileError::InvalidContent {
            path: path.to_path_buf(),
            message: "file is not valid UTF-8".to_string(),
        },
        _ => ReconcileError::io(path, e),
    })
}
