//! Dependency path discovery.
//!
//! The downstream tools need the archives shipped with the MIND distribution
//! on their class path. The list is computed here and handed to the launcher
//! as data.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{BuilderError, Result};

/// Install subdirectories searched for archives, in order.
pub const SEARCH_DIRS: [&str; 3] = ["lib", "ext", "bin"];

/// Supplies the extra search paths a downstream tool runs with.
pub trait DependencyPathSupplier {
    fn dependency_paths(&self) -> Result<Vec<PathBuf>>;
}

/// Lists the `.jar` archives found directly in the install root's
/// `lib/`, `ext/` and `bin/` folders.
#[derive(Debug, Clone)]
pub struct InstallRootSupplier {
    root: PathBuf,
}

impl InstallRootSupplier {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl DependencyPathSupplier for InstallRootSupplier {
    fn dependency_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for name in SEARCH_DIRS {
            let dir = self.root.join(name);
            if !dir.is_dir() {
                debug!(dir = %dir.display(), "skipping missing dependency directory");
                continue;
            }
            for entry in WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = entry.map_err(|source| BuilderError::Discovery {
                    path: dir.clone(),
                    source,
                })?;
                if is_archive(entry.path()) {
                    paths.push(entry.into_path());
                }
            }
        }
        debug!(count = paths.len(), "discovered dependency paths");
        Ok(paths)
    }
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(".jar"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lists_archives_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for sub in ["lib", "ext", "bin"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        fs::write(root.join("lib/b.jar"), "").unwrap();
        fs::write(root.join("lib/a.jar"), "").unwrap();
        fs::write(root.join("lib/readme.txt"), "").unwrap();
        fs::write(root.join("ext/plugin.jar"), "").unwrap();
        fs::write(root.join("bin/mindc"), "").unwrap();
        fs::create_dir_all(root.join("lib/nested")).unwrap();
        fs::write(root.join("lib/nested/deep.jar"), "").unwrap();

        let paths = InstallRootSupplier::new(root).dependency_paths().unwrap();
        assert_eq!(
            paths,
            vec![
                root.join("lib/a.jar"),
                root.join("lib/b.jar"),
                root.join("ext/plugin.jar"),
            ]
        );
    }

    #[test]
    fn test_missing_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("lib/core.jar"), "").unwrap();

        let paths = InstallRootSupplier::new(dir.path()).dependency_paths().unwrap();
        assert_eq!(paths, vec![dir.path().join("lib/core.jar")]);
    }

    #[test]
    fn test_is_archive() {
        assert!(is_archive(Path::new("/opt/mind/lib/mindc.jar")));
        assert!(is_archive(Path::new("lib/old.jar.bak")));
        assert!(!is_archive(Path::new("/opt/mind.jar/lib/readme")));
    }
}
