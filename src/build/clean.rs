//! Output directory cleanup.
//!
//! `clean-build`, `clean-test` and `clean-draw` remove one output directory
//! tree each. Removing a directory that is already gone is not an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{BuilderError, Result};

/// What a clean did, or would do in dry-run mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub path: PathBuf,
    /// Files under the path before removal; `None` when nothing was there
    pub files: Option<usize>,
    pub dry_run: bool,
}

impl CleanReport {
    pub fn removed_anything(&self) -> bool {
        self.files.is_some()
    }
}

/// Recursively delete `path`.
pub fn clean(path: &Path, dry_run: bool) -> Result<CleanReport> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "nothing to clean");
            return Ok(CleanReport {
                path: path.to_path_buf(),
                files: None,
                dry_run,
            });
        }
        Err(source) => {
            return Err(BuilderError::RemoveDir {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let files = count_files(path);
    if !dry_run {
        let removal = if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        removal.map_err(|source| BuilderError::RemoveDir {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), files, "removed output");
    }

    Ok(CleanReport {
        path: path.to_path_buf(),
        files: Some(files),
        dry_run,
    })
}

/// A symlinked root counts as one entry; its target is left alone.
fn count_files(path: &Path) -> usize {
    WalkDir::new(path)
        .follow_root_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated(root: &Path) -> PathBuf {
        let target = root.join("out/Debug/binary");
        fs::create_dir_all(target.join("nested/deeper")).unwrap();
        fs::write(target.join("app"), "bin").unwrap();
        fs::write(target.join("nested/a.o"), "obj").unwrap();
        fs::write(target.join("nested/deeper/b.o"), "obj").unwrap();
        target
    }

    #[test]
    fn test_clean_removes_tree() {
        let dir = tempfile::tempdir().unwrap();
        let target = populated(dir.path());

        let report = clean(&target, false).unwrap();
        assert_eq!(report.files, Some(3));
        assert!(report.removed_anything());
        assert!(!target.exists());
        // siblings are untouched
        assert!(dir.path().join("out/Debug").is_dir());
    }

    #[test]
    fn test_clean_absent_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let target = populated(dir.path());
        clean(&target, false).unwrap();

        let second = clean(&target, false).unwrap();
        assert_eq!(second.files, None);
        assert!(!second.removed_anything());
    }

    #[test]
    fn test_clean_dry_run_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = populated(dir.path());

        let report = clean(&target, true).unwrap();
        assert_eq!(report.files, Some(3));
        assert!(report.dry_run);
        assert!(target.join("nested/deeper/b.o").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_reports_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x".repeat(300));

        let err = clean(&target, false).unwrap_err();
        assert!(matches!(err, BuilderError::RemoveDir { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_symlink_removes_only_the_link() {
        let dir = tempfile::tempdir().unwrap();
        let real = populated(dir.path());
        let link = dir.path().join("graphic");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let report = clean(&link, false).unwrap();
        assert_eq!(report.files, Some(1));
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(real.join("nested/deeper/b.o").exists());
    }

    #[test]
    fn test_clean_removes_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("graphic");
        fs::write(&target, "stale").unwrap();

        let report = clean(&target, false).unwrap();
        assert_eq!(report.files, Some(1));
        assert!(!target.exists());
    }
}
