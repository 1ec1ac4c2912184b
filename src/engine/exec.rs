//! engine::exec
//!
//! The executor: the only component that mutates the filesystem.
//!
//! # Executor Contract
//!
//! The executor MUST:
//! 1. Apply a file's steps in order
//! 2. Refuse to overwrite a different, existing file
//! 3. Write rewritten content to a temporary sibling, sync it, and rename
//!    it into place before removing the old file
//! 4. Stop at the first failing step
//!
//! # Invariants
//!
//! - A bumped filename never holds un-bumped content
//! - A failed rename leaves the source file where it was
//!
//! Dry runs replay plans through a [`Simulator`] instead, which reports
//! the same collisions without touching the tree.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use yamlnorm::core::policy::Policy;
//! use yamlnorm::engine::{plan_file, Executor};
//!
//! let path = Path::new("defs/draft.yaml");
//! let text = std::fs::read_to_string(path)?;
//! let plan = plan_file(path, &text, Policy::Classify)?;
//! Executor::new().apply(&plan)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::plan::{FilePlan, PlanStep};
use super::ReconcileError;

/// Applies plan steps to the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct Executor;

impl Executor {
    pub fn new() -> Self {
        Self
    }

    /// Apply every step of one file's plan.
    ///
    /// # Errors
    ///
    /// Returns `TargetExists` if a step would overwrite another file, or
    /// `Io` if the filesystem refuses an operation.
    pub fn apply(&self, file: &FilePlan) -> Result<(), ReconcileError> {
        for step in &file.steps {
            self.apply_step(step)?;
        }
        Ok(())
    }

    fn apply_step(&self, step: &PlanStep) -> Result<(), ReconcileError> {
        match step {
            PlanStep::Rename { from, to } => {
                if from == to {
                    return Ok(());
                }
                ensure_vacant(from, to)?;
                fs::rename(from, to).map_err(|e| ReconcileError::io(from, e))?;
                info!(from = %from.display(), to = %to.display(), "renamed");
            }
            PlanStep::RewriteVersion {
                from,
                to,
                old_version,
                new_version,
                contents,
            } => {
                if from != to {
                    ensure_vacant(from, to)?;
                }
                write_atomic(to, contents)?;
                if from != to {
                    fs::remove_file(from).map_err(|e| ReconcileError::io(from, e))?;
                }
                info!(
                    from = %from.display(),
                    to = %to.display(),
                    %old_version,
                    %new_version,
                    "bumped version"
                );
            }
        }
        Ok(())
    }
}

/// Replays plans against an in-memory view of the tree without touching it.
///
/// Reports the same `TargetExists` collisions the [`Executor`] would,
/// including two files planned onto the same target in one run.
#[derive(Debug, Default, Clone)]
pub struct Simulator {
    created: HashSet<PathBuf>,
    removed: HashSet<PathBuf>,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every step of one file's plan.
    ///
    /// # Errors
    ///
    /// Returns `TargetExists` if a step would land on a path that exists on
    /// disk or was claimed by an earlier step, and has not been vacated.
    pub fn apply(&mut self, file: &FilePlan) -> Result<(), ReconcileError> {
        for step in &file.steps {
            let (from, to) = match step {
                PlanStep::Rename { from, to } | PlanStep::RewriteVersion { from, to, .. } => {
                    (from, to)
                }
            };
            if from == to {
                continue;
            }
            if self.occupied(to) {
                return Err(ReconcileError::TargetExists {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            self.created.remove(from);
            self.removed.insert(from.clone());
            self.removed.remove(to);
            self.created.insert(to.clone());
        }
        Ok(())
    }

    fn occupied(&self, path: &Path) -> bool {
        self.created.contains(path) || (!self.removed.contains(path) && path.exists())
    }
}

fn ensure_vacant(from: &Path, to: &Path) -> Result<(), ReconcileError> {
    if to.exists() {
        return Err(ReconcileError::TargetExists {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }
    Ok(())
}

/// Write a file atomically.
///
/// Writes to `<path>.tmp` in the same directory, syncs, then renames over
/// `path`, so readers see either nothing or the full contents.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ReconcileError> {
    let temp_path = path.with_extension("yaml.tmp");
    debug!(path = %temp_path.display(), "writing temporary file");

    let mut file = fs::File::create(&temp_path).map_err(|e| ReconcileError::io(&temp_path, e))?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ReconcileError::io(&temp_path, e))?;

    file.sync_all()
        .map_err(|e| ReconcileError::io(&temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| ReconcileError::io(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CanonicalName;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn file_plan(source: &Path, target: &Path, steps: Vec<PlanStep>) -> FilePlan {
        FilePlan {
            source: source.to_path_buf(),
            name: CanonicalName::new("foo").unwrap(),
            target: target.to_path_buf(),
            steps,
        }
    }

    #[test]
    fn rename_moves_file() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("draft.yaml");
        let to = temp.path().join("foo.tree.yaml");
        fs::write(&from, "name: foo\n").unwrap();

        let plan = file_plan(
            &from,
            &to,
            vec![PlanStep::Rename {
                from: from.clone(),
                to: to.clone(),
            }],
        );
        Executor::new().apply(&plan).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "name: foo\n");
    }

    #[test]
    fn rename_refuses_to_clobber() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("draft.yaml");
        let to = temp.path().join("foo.tree.yaml");
        fs::write(&from, "new").unwrap();
        fs::write(&to, "old").unwrap();

        let plan = file_plan(
            &from,
            &to,
            vec![PlanStep::Rename {
                from: from.clone(),
                to: to.clone(),
            }],
        );
        let err = Executor::new().apply(&plan).unwrap_err();

        assert!(matches!(err, ReconcileError::TargetExists { .. }));
        assert_eq!(fs::read_to_string(&from).unwrap(), "new");
        assert_eq!(fs::read_to_string(&to).unwrap(), "old");
    }

    #[test]
    fn rewrite_replaces_old_file() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("foo-1.0.0.yaml");
        let to = temp.path().join("foo-1.0.1.yaml");
        fs::write(&from, "name: foo\nversion: 1.0.0\n").unwrap();

        let plan = file_plan(
            &from,
            &to,
            vec![PlanStep::RewriteVersion {
                from: from.clone(),
                to: to.clone(),
                old_version: "1.0.0".to_string(),
                new_version: "1.0.1".to_string(),
                contents: "name: foo\nversion: 1.0.1\n".to_string(),
            }],
        );
        Executor::new().apply(&plan).unwrap();

        assert!(!from.exists());
        assert_eq!(
            fs::read_to_string(&to).unwrap(),
            "name: foo\nversion: 1.0.1\n"
        );
        let leftovers: Vec<PathBuf> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn simulator_reports_existing_target() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("draft.yaml");
        let to = temp.path().join("walk.tree.yaml");
        fs::write(&from, "new").unwrap();
        fs::write(&to, "old").unwrap();

        let plan = file_plan(
            &from,
            &to,
            vec![PlanStep::Rename {
                from: from.clone(),
                to: to.clone(),
            }],
        );
        let err = Simulator::new().apply(&plan).unwrap_err();

        assert!(matches!(err, ReconcileError::TargetExists { .. }));
        assert!(from.is_file());
    }

    #[test]
    fn simulator_reports_shared_target() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.yaml");
        let b = temp.path().join("b.yaml");
        let to = temp.path().join("walk.tree.yaml");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();

        let mut sim = Simulator::new();
        sim.apply(&file_plan(
            &a,
            &to,
            vec![PlanStep::Rename {
                from: a.clone(),
                to: to.clone(),
            }],
        ))
        .unwrap();
        let err = sim
            .apply(&file_plan(
                &b,
                &to,
                vec![PlanStep::Rename {
                    from: b.clone(),
                    to: to.clone(),
                }],
            ))
            .unwrap_err();

        assert!(matches!(err, ReconcileError::TargetExists { .. }));
        assert!(!to.exists());
    }

    #[test]
    fn simulator_allows_vacated_path() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("foo-1.0.0.yaml");
        let second = temp.path().join("bar.yaml");
        fs::write(&first, "").unwrap();
        fs::write(&second, "").unwrap();

        let mut sim = Simulator::new();
        sim.apply(&file_plan(
            &first,
            &temp.path().join("foo-1.0.1.yaml"),
            vec![PlanStep::RewriteVersion {
                from: first.clone(),
                to: temp.path().join("foo-1.0.1.yaml"),
                old_version: "1.0.0".to_string(),
                new_version: "1.0.1".to_string(),
                contents: String::new(),
            }],
        ))
        .unwrap();
        sim.apply(&file_plan(
            &second,
            &first,
            vec![PlanStep::Rename {
                from: second.clone(),
                to: first.clone(),
            }],
        ))
        .unwrap();
    }

    #[test]
    fn rename_then_rewrite_chain() {
        let temp = TempDir::new().unwrap();
        let draft = temp.path().join("draft.yaml");
        let mid = temp.path().join("foo-2.0.0.yaml");
        let last = temp.path().join("foo-2.0.1.yaml");
        fs::write(&draft, "name: foo\nversion: 2.0.0\n").unwrap();

        let plan = file_plan(
            &draft,
            &last,
            vec![
                PlanStep::Rename {
                    from: draft.clone(),
                    to: mid.clone(),
                },
                PlanStep::RewriteVersion {
                    from: mid.clone(),
                    to: last.clone(),
                    old_version: "2.0.0".to_string(),
                    new_version: "2.0.1".to_string(),
                    contents: "name: foo\nversion: 2.0.1\n".to_string(),
                },
            ],
        );
        Executor::new().apply(&plan).unwrap();

        assert!(!draft.exists());
        assert!(!mid.exists());
        assert!(last.is_file());
    }
}
