//! Downstream tool launching.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use colored::*;
use tracing::debug;

use crate::error::{BuilderError, Result};
use crate::options::ArgumentList;

/// Variable the dependency paths are handed to the tool through.
pub const CLASSPATH_VAR: &str = "CLASSPATH";

/// The MIND tools the builder hands off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// `mindc`, used by build and draw
    Compiler,
    /// `mindunit`, used by test
    TestRunner,
}

impl Tool {
    pub fn program_name(self) -> &'static str {
        match self {
            Tool::Compiler => "mindc",
            Tool::TestRunner => "mindunit",
        }
    }

    /// Location of the tool's launcher script under `bin_dir`.
    pub fn program(self, bin_dir: &Path) -> PathBuf {
        if cfg!(windows) {
            bin_dir.join(format!("{}.bat", self.program_name()))
        } else {
            bin_dir.join(self.program_name())
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program_name())
    }
}

/// Everything a tool run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: Tool,
    pub arguments: ArgumentList,
    pub dependency_paths: Vec<PathBuf>,
}

/// Runs a downstream tool.
pub trait ToolLauncher {
    fn launch(&self, invocation: &Invocation) -> Result<()>;
}

/// Spawns the tool from `<root>/bin` and waits for it.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    bin_dir: PathBuf,
}

impl ProcessLauncher {
    pub fn new(install_root: &Path) -> Self {
        Self {
            bin_dir: install_root.join("bin"),
        }
    }
}

impl ToolLauncher for ProcessLauncher {
    fn launch(&self, invocation: &Invocation) -> Result<()> {
        let program = invocation.tool.program(&self.bin_dir);
        let mut cmd = Command::new(&program);
        cmd.args(invocation.arguments.as_slice());

        // Dependency paths go to the child only; our own environment is untouched.
        if !invocation.dependency_paths.is_empty() {
            let class_path = env::join_paths(&invocation.dependency_paths)?;
            cmd.env(CLASSPATH_VAR, class_path);
        }

        debug!(program = %program.display(), args = %invocation.arguments, "launching tool");
        let status = cmd
            .status()
            .map_err(|source| BuilderError::ToolLaunch { program, source })?;

        if !status.success() {
            return Err(BuilderError::ToolFailed {
                tool: invocation.tool.to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Prints the command line instead of running it.
#[derive(Debug, Clone)]
pub struct DryRunLauncher {
    bin_dir: PathBuf,
}

impl DryRunLauncher {
    pub fn new(install_root: &Path) -> Self {
        Self {
            bin_dir: install_root.join("bin"),
        }
    }
}

impl ToolLauncher for DryRunLauncher {
    fn launch(&self, invocation: &Invocation) -> Result<()> {
        let program = invocation.tool.program(&self.bin_dir);
        println!(
            "{} {} {}",
            "[dry-run]".dimmed(),
            program.display().to_string().bold(),
            invocation.arguments
        );
        for path in &invocation.dependency_paths {
            println!("   {} {}", "classpath:".dimmed(), path.display());
        }
        Ok(())
    }
}
