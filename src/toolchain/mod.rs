//! MIND installation lookup.
//!
//! The install root holds the `lib/`, `ext/` and `bin/` folders of a MIND
//! distribution. It is located once per run, either from `MIND_ROOT` or from
//! where the builder executable itself lives, and then only read.

pub mod discovery;
pub mod launcher;

pub use discovery::{DependencyPathSupplier, InstallRootSupplier};
pub use launcher::{DryRunLauncher, Invocation, ProcessLauncher, Tool, ToolLauncher};

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{BuilderError, Result};

pub const MIND_ROOT_VAR: &str = "MIND_ROOT";
pub const MINDOC_HOME_VAR: &str = "MINDOC_HOME";

/// Locate the install root from the environment or the running executable.
pub fn install_root() -> Result<PathBuf> {
    resolve_install_root(std::env::var_os(MIND_ROOT_VAR), std::env::current_exe())
}

/// Resolve the install root from an optional `MIND_ROOT` value and the
/// location of the current executable (`<root>/bin/<exe>`).
pub fn resolve_install_root(
    mind_root: Option<OsString>,
    current_exe: io::Result<PathBuf>,
) -> Result<PathBuf> {
    let candidate = match mind_root.filter(|value| !value.is_empty()) {
        Some(value) => PathBuf::from(value),
        None => {
            let exe = current_exe.map_err(|e| {
                BuilderError::InstallRoot(format!(
                    "{MIND_ROOT_VAR} is not set and the executable location is unknown ({e})"
                ))
            })?;
            exe.parent()
                .and_then(|bin| bin.parent())
                .map(PathBuf::from)
                .ok_or_else(|| {
                    BuilderError::InstallRoot(format!(
                        "{MIND_ROOT_VAR} is not set and {} has no parent install directory",
                        exe.display()
                    ))
                })?
        }
    };

    let root = candidate
        .canonicalize()
        .map_err(|source| BuilderError::InstallRootAccess {
            path: candidate.clone(),
            source,
        })?;
    debug!(root = %root.display(), "resolved MIND install root");
    Ok(root)
}

/// Documentation tool root from `MINDOC_HOME`, when set.
pub fn doc_root() -> Option<PathBuf> {
    std::env::var_os(MINDOC_HOME_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
