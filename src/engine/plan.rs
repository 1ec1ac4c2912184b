//! engine::plan
//!
//! Typed, previewable plans.
//!
//! # Architecture
//!
//! Plans are the only intermediate representation between a validated
//! record and a filesystem mutation. The planner reads file contents but
//! never writes; the [`Executor`](super::Executor) applies steps.
//!
//! Plans are:
//! - **Deterministic**: Same tree and policy always produce the same plan
//! - **Previewable**: Shown to the user by `check` and `fix --dry-run`
//! - **Serializable**: Emitted as JSON by `check --json`
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use yamlnorm::core::policy::Policy;
//! use yamlnorm::core::types::CanonicalName;
//! use yamlnorm::engine::plan::{FilePlan, Plan, PlanStep};
//!
//! let mut plan = Plan::new(PathBuf::from("defs"), Policy::Classify);
//! plan.push(FilePlan {
//!     source: PathBuf::from("defs/draft.yaml"),
//!     name: CanonicalName::new("resize").unwrap(),
//!     target: PathBuf::from("defs/resize.tree.yaml"),
//!     steps: vec![PlanStep::Rename {
//!         from: PathBuf::from("defs/draft.yaml"),
//!         to: PathBuf::from("defs/resize.tree.yaml"),
//!     }],
//! });
//!
//! assert!(!plan.is_empty());
//! assert_eq!(plan.changed_count(), 1);
//! assert!(plan.digest().unwrap().starts_with("sha256:"));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::policy::Policy;
use crate::core::types::CanonicalName;

/// A single filesystem mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanStep {
    /// Move a file to its target name within the same directory.
    Rename {
        /// Current path.
        from: PathBuf,
        /// Target path.
        to: PathBuf,
    },

    /// Write the record with a bumped version to `to`, then remove `from`.
    ///
    /// The write is atomic: `to` either does not exist or holds the
    /// complete bumped content.
    RewriteVersion {
        /// Path holding the record before the bump.
        from: PathBuf,
        /// Path named after the bumped version.
        to: PathBuf,
        /// Version before the bump.
        old_version: String,
        /// Version after the bump.
        new_version: String,
        /// Serialized record with the new version.
        #[serde(skip)]
        contents: String,
    },
}

impl PlanStep {
    /// Human-readable description, with paths shown relative to `root`.
    pub fn describe(&self, root: &Path) -> String {
        match self {
            PlanStep::Rename { from, to } => {
                format!("rename {} -> {}", display(root, from), display(root, to))
            }
            PlanStep::RewriteVersion {
                from,
                to,
                old_version,
                new_version,
                ..
            } => format!(
                "bump {} -> {}: {} -> {}",
                old_version,
                new_version,
                display(root, from),
                display(root, to)
            ),
        }
    }
}

/// The steps for one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilePlan {
    /// Path the file was found at.
    pub source: PathBuf,
    /// Canonical name declared by the file.
    pub name: CanonicalName,
    /// Path the file ends up at.
    pub target: PathBuf,
    /// Ordered steps; empty when the file is already named correctly.
    pub steps: Vec<PlanStep>,
}

impl FilePlan {
    /// Check if nothing needs to happen to this file.
    pub fn is_noop(&self) -> bool {
        self.steps.is_empty()
    }
}

/// The plan for a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Root the run walked.
    pub root: PathBuf,
    /// Policy the plan was resolved under.
    pub policy: Policy,
    /// Per-file plans, in walk order.
    files: Vec<FilePlan>,
}

impl Plan {
    /// Create a new empty plan.
    pub fn new(root: PathBuf, policy: Policy) -> Self {
        Self {
            root,
            policy,
            files: vec![],
        }
    }

    /// Append a file's plan.
    pub fn push(&mut self, file: FilePlan) {
        self.files.push(file);
    }

    /// All file plans, including no-ops.
    pub fn files(&self) -> &[FilePlan] {
        &self.files
    }

    /// Files that need at least one step.
    pub fn changed(&self) -> impl Iterator<Item = &FilePlan> {
        self.files.iter().filter(|f| !f.is_noop())
    }

    /// Number of files that need at least one step.
    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }

    /// Total number of steps.
    pub fn step_count(&self) -> usize {
        self.files.iter().map(|f| f.steps.len()).sum()
    }

    /// Check if the plan changes nothing.
    pub fn is_empty(&self) -> bool {
        self.changed_count() == 0
    }

    /// Final path of every file, in walk order.
    pub fn final_paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.target.as_path())
    }

    /// Compute a digest of the plan.
    ///
    /// The digest is a SHA-256 hash of the JSON serialization, so two
    /// `check` runs over an unchanged tree report the same value.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be serialized, which happens when
    /// a path is not valid UTF-8.
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(&self)?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        let hash = hasher.finalize();
        Ok(format!("sha256:{}", hex::encode(hash)))
    }

    /// Generate a preview string.
    ///
    /// Returns a human-readable description of what the plan does.
    pub fn preview(&self) -> String {
        if self.is_empty() {
            return format!("{} ({}): no changes needed", self.root.display(), self.policy);
        }

        let mut lines = vec![format!(
            "{} file(s) to change ({} policy):",
            self.changed_count(),
            self.policy
        )];
        let steps = self.changed().flat_map(|f| f.steps.iter());
        for (i, step) in steps.enumerate() {
            lines.push(format!("  {}. {}", i + 1, step.describe(&self.root)));
        }
        if self.policy.bumps_version() {
            lines.push("note: the versioned policy bumps every file's patch version on every run".to_string());
        }

        lines.join("\n")
    }
}

/// Show `path` relative to `root` when it lies beneath it.
fn display(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}
