//! engine::scan
//!
//! Directory walk that feeds the reconciler.
//!
//! # Rules
//!
//! - Directories whose name is in the skip list are pruned entirely, so
//!   nothing beneath them is read or renamed
//! - Only files whose name ends in `.yaml` are returned; a symbolic link
//!   counts when it points at a regular file, even if links are not
//!   followed into directories
//! - Results are sorted by file name within each directory, so runs are
//!   deterministic

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use super::ReconcileError;

/// Extension of files the reconciler processes.
pub const YAML_SUFFIX: &str = ".yaml";

/// Options for the directory walk.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Directory names to prune.
    pub skip_dirs: Vec<String>,
    /// Follow symbolic links.
    pub follow_symlinks: bool,
}

impl ScanOptions {
    fn is_skipped(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.skip_dirs.iter().any(|skip| skip == name))
    }
}

/// Whether a file name is one the reconciler processes.
pub fn is_yaml_file(file_name: &str) -> bool {
    file_name.ends_with(YAML_SUFFIX)
}

/// Collect every YAML file under `root`.
///
/// # Errors
///
/// Returns `ReconcileError::Io` if the root or any directory beneath it
/// cannot be read.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>, ReconcileError> {
    let walker = WalkDir::new(root)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let skipped = options.is_skipped(entry);
            if skipped {
                trace!(path = %entry.path().display(), "skipping directory");
            }
            !skipped
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
            ReconcileError::Io { path, source }
        })?;

        if !entry.file_name().to_str().is_some_and(is_yaml_file) {
            continue;
        }
        let file_type = entry.file_type();
        if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
            files.push(entry.into_path());
        } else if file_type.is_symlink() {
            debug!(path = %entry.path().display(), "skipping link that is not a regular file");
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn github_only() -> ScanOptions {
        ScanOptions {
            skip_dirs: vec![".github".to_string()],
            follow_symlinks: false,
        }
    }

    fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
        files
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn yaml_suffix_only() {
        assert!(is_yaml_file("a.yaml"));
        assert!(is_yaml_file("a.tree.yaml"));
        assert!(!is_yaml_file("a.yml"));
        assert!(!is_yaml_file("a.yaml.bak"));
    }

    #[test]
    fn collects_yaml_files_sorted() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b.yaml");
        touch(temp.path(), "a.yaml");
        touch(temp.path(), "notes.txt");
        touch(temp.path(), "nested/deep/c.yaml");

        let files = scan(temp.path(), &github_only()).unwrap();

        assert_eq!(
            relative(temp.path(), files),
            vec!["a.yaml", "b.yaml", "nested/deep/c.yaml"]
        );
    }

    #[test]
    fn prunes_skipped_directories_at_any_depth() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".github/workflows/ci.yaml");
        touch(temp.path(), "pkg/.github/dependabot.yaml");
        touch(temp.path(), "pkg/kept.yaml");
        // Only whole components are matched
        touch(temp.path(), "site.github.io/page.yaml");

        let files = scan(temp.path(), &github_only()).unwrap();

        assert_eq!(
            relative(temp.path(), files),
            vec!["pkg/kept.yaml", "site.github.io/page.yaml"]
        );
    }

    #[test]
    fn custom_skip_list() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "vendor/x.yaml");
        touch(temp.path(), ".github/y.yaml");

        let options = ScanOptions {
            skip_dirs: vec!["vendor".to_string()],
            follow_symlinks: false,
        };
        let files = scan(temp.path(), &options).unwrap();

        assert_eq!(relative(temp.path(), files), vec![".github/y.yaml"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_collected_without_following() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        touch(temp.path(), "store/real.yaml");
        symlink(
            temp.path().join("store/real.yaml"),
            temp.path().join("linked.yaml"),
        )
        .unwrap();
        symlink(temp.path().join("absent.yaml"), temp.path().join("broken.yaml")).unwrap();

        let files = scan(temp.path(), &github_only()).unwrap();

        assert_eq!(
            relative(temp.path(), files),
            vec!["linked.yaml", "store/real.yaml"]
        );
    }

    #[test]
    fn missing_root_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = scan(&temp.path().join("absent"), &github_only()).unwrap_err();
        assert!(matches!(err, ReconcileError::Io { .. }));
    }
}
