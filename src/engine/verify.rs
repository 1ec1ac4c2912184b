//! engine::verify
//!
//! Post-walk invariant verification.
//!
//! # Invariants Checked
//!
//! Under the classify policy, the tree must contain exactly one each of
//! `nodes.lib.yaml`, `modules.lib.yaml` and `tools.lib.yaml`, counted by
//! the names files have after reconciliation.
//!
//! Verification is read-only and deterministic.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::types::LibraryKind;

use super::ReconcileError;

/// Where each library file was found.
#[derive(Debug, Clone, Default)]
pub struct LibraryCounts {
    locations: BTreeMap<LibraryKind, Vec<PathBuf>>,
}

impl LibraryCounts {
    /// Number of files found for a library.
    pub fn count(&self, kind: LibraryKind) -> usize {
        self.locations.get(&kind).map_or(0, Vec::len)
    }

    /// Paths found for a library.
    pub fn locations(&self, kind: LibraryKind) -> &[PathBuf] {
        self.locations
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Count library files among a set of final paths.
pub fn count_libraries<'a>(paths: impl IntoIterator<Item = &'a Path>) -> LibraryCounts {
    let mut counts = LibraryCounts::default();
    for path in paths {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(kind) = LibraryKind::ALL
            .into_iter()
            .find(|kind| kind.file_name() == file_name)
        {
            counts
                .locations
                .entry(kind)
                .or_default()
                .push(path.to_path_buf());
        }
    }
    counts
}

/// Check that every library file exists exactly once.
///
/// # Errors
///
/// Returns `LibraryFileCount` for the first library (in `nodes`,
/// `modules`, `tools` order) whose count is not one.
pub fn verify_libraries(counts: &LibraryCounts) -> Result<(), ReconcileError> {
    for kind in LibraryKind::ALL {
        let count = counts.count(kind);
        if count != 1 {
            return Err(ReconcileError::LibraryFileCount {
                file_name: kind.file_name(),
                count,
                locations: counts.locations(kind).to_vec(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(paths: &[&str]) -> LibraryCounts {
        count_libraries(paths.iter().map(Path::new))
    }

    #[test]
    fn exactly_one_each_passes() {
        let c = counts(&[
            "r/nodes.lib.yaml",
            "r/a/modules.lib.yaml",
            "r/b/tools.lib.yaml",
            "r/walk.tree.yaml",
        ]);
        assert!(verify_libraries(&c).is_ok());
        assert_eq!(c.count(LibraryKind::Modules), 1);
    }

    #[test]
    fn missing_library_reported() {
        let c = counts(&["r/nodes.lib.yaml", "r/modules.lib.yaml"]);
        match verify_libraries(&c).unwrap_err() {
            ReconcileError::LibraryFileCount {
                file_name, count, ..
            } => {
                assert_eq!(file_name, "tools.lib.yaml");
                assert_eq!(count, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicates_reported_with_locations() {
        let c = counts(&[
            "r/a/nodes.lib.yaml",
            "r/b/nodes.lib.yaml",
            "r/modules.lib.yaml",
            "r/tools.lib.yaml",
        ]);
        let err = verify_libraries(&c).unwrap_err();
        assert_eq!(
            err.to_string(),
            "exactly one nodes.lib.yaml is required, but found 2"
        );
        assert_eq!(c.locations(LibraryKind::Nodes).len(), 2);
    }

    #[test]
    fn similar_names_not_counted() {
        let c = counts(&["r/nodes.lib.yml", "r/my_nodes.lib.yaml", "r/nodes.tree.yaml"]);
        assert_eq!(c.count(LibraryKind::Nodes), 0);
    }
}
