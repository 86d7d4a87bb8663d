use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{BuilderError, Result};

/// Create `path` and its parents unless it already exists.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        debug!(dir = %path.display(), "creating output directory");
        fs::create_dir_all(path).map_err(|source| BuilderError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
