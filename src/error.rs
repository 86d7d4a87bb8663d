//! Error taxonomy and process exit codes.
//!
//! Every failure aborts the current command. Each [`BuilderError`] belongs to
//! one [`ErrorClass`], and each class has its own exit status so scripts can
//! tell a bad command line from a missing install root or a failed compile.

use std::env::JoinPathsError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = BuilderError> = std::result::Result<T, E>;

/// Broad category of a failure, one exit status each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad command line (no command, unknown command, too many arguments).
    /// Reported by the argument parser before any error value exists.
    Usage,
    /// Install root could not be determined
    Environment,
    /// Properties file missing, unreadable or malformed
    Configuration,
    /// Output directory creation or deletion failed
    Filesystem,
    /// Dependency path enumeration failed
    Discovery,
    /// The downstream tool could not be started or reported failure
    Tool,
}

impl ErrorClass {
    pub const fn exit_code(self) -> u8 {
        match self {
            ErrorClass::Usage => 2,
            ErrorClass::Environment => 3,
            ErrorClass::Configuration => 4,
            ErrorClass::Filesystem => 5,
            ErrorClass::Discovery => 6,
            ErrorClass::Tool => 7,
        }
    }
}

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("cannot determine the MIND install root: {0}")]
    InstallRoot(String),

    #[error("install root {} is not accessible: {source}", .path.display())]
    InstallRootAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration file {} does not exist", .path.display())]
    PropertiesNotFound { path: PathBuf },

    #[error("failed to read configuration file {}: {source}", .path.display())]
    PropertiesUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed configuration file {}: {message}", .path.display())]
    PropertiesParse { path: PathBuf, message: String },

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {}: {source}", .path.display())]
    RemoveDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list dependency directory {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("dependency paths cannot be passed to the tool: {0}")]
    DependencyPathJoin(#[from] JoinPathsError),

    #[error("failed to start {}: {source}", .program.display())]
    ToolLaunch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{tool} failed ({status})")]
    ToolFailed { tool: String, status: String },
}

impl BuilderError {
    pub fn class(&self) -> ErrorClass {
        match self {
            BuilderError::InstallRoot(_) | BuilderError::InstallRootAccess { .. } => {
                ErrorClass::Environment
            }
            BuilderError::PropertiesNotFound { .. }
            | BuilderError::PropertiesUnreadable { .. }
            | BuilderError::PropertiesParse { .. } => ErrorClass::Configuration,
            BuilderError::CreateDir { .. } | BuilderError::RemoveDir { .. } => {
                ErrorClass::Filesystem
            }
            BuilderError::Discovery { .. } | BuilderError::DependencyPathJoin(_) => {
                ErrorClass::Discovery
            }
            BuilderError::ToolLaunch { .. } | BuilderError::ToolFailed { .. } => ErrorClass::Tool,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.class().exit_code()
    }

    /// Short suggestion printed under the error message, when one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            BuilderError::InstallRoot(_) | BuilderError::InstallRootAccess { .. } => {
                Some("Set MIND_ROOT to the directory holding the MIND lib/, ext/ and bin/ folders.")
            }
            BuilderError::PropertiesNotFound { .. } => Some(
                "Pass an existing properties file, or omit it to read settings from the environment.",
            ),
            BuilderError::ToolLaunch { .. } => {
                Some("Check that the MIND bin/ directory contains mindc and mindunit.")
            }
            _ => None,
        }
    }
}
