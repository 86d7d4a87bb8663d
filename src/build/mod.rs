//! Command dispatch.
//!
//! One command runs per invocation. Launching commands (build, test, draw)
//! assemble their argument list, make sure the output directory exists and
//! hand off to a MIND tool. Clean commands remove one output directory.
//! `doc` is accepted but does nothing yet.

mod clean;
mod utils;

pub use clean::{CleanReport, clean};
pub use utils::ensure_dir;

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::layout::OutputKind;
use crate::pipeline::Pipeline;
use crate::toolchain::{DependencyPathSupplier, Invocation, ToolLauncher};

/// A builder command, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Command {
    /// Compile the executable component into the binary output directory
    Build,
    /// Compile the test suite into the test-binary output directory
    Test,
    /// Render the component architecture into the graphic output directory
    Draw,
    /// Remove the binary output directory
    CleanBuild,
    /// Remove the test-binary output directory
    CleanTest,
    /// Remove the graphic output directory
    CleanDraw,
    /// Generate documentation (not implemented yet)
    Doc,
}

/// What a command turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Launch(Pipeline),
    Clean(OutputKind),
    Doc,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Build,
        Command::Test,
        Command::Draw,
        Command::CleanBuild,
        Command::CleanTest,
        Command::CleanDraw,
        Command::Doc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Build => "build",
            Command::Test => "test",
            Command::Draw => "draw",
            Command::CleanBuild => "clean-build",
            Command::CleanTest => "clean-test",
            Command::CleanDraw => "clean-draw",
            Command::Doc => "doc",
        }
    }

    pub fn action(self) -> Action {
        match self {
            Command::Build => Action::Launch(Pipeline::BUILD),
            Command::Test => Action::Launch(Pipeline::TEST),
            Command::Draw => Action::Launch(Pipeline::DRAW),
            Command::CleanBuild => Action::Clean(OutputKind::Binary),
            Command::CleanTest => Action::Clean(OutputKind::TestBinary),
            Command::CleanDraw => Action::Clean(OutputKind::Graphic),
            Command::Doc => Action::Doc,
        }
    }

    /// Whether the command needs the MIND install.
    pub fn launches_tool(self) -> bool {
        matches!(self.action(), Action::Launch(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The launcher and dependency supplier a launching command uses.
pub struct Tools {
    pub launcher: Box<dyn ToolLauncher>,
    pub supplier: Box<dyn DependencyPathSupplier>,
}

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Launched(Invocation),
    Cleaned(CleanReport),
    DocSkipped,
}

/// Runs one command against resolved settings.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    settings: Settings,
    dry_run: bool,
}

impl Dispatcher {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            dry_run: false,
        }
    }

    /// In dry-run mode no directory is created or removed.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run `command`. `tools` is only called for commands that launch a tool,
    /// so cleaning never depends on a MIND install being present.
    pub fn run<F>(&self, command: Command, tools: F) -> Result<Outcome>
    where
        F: FnOnce() -> Result<Tools>,
    {
        debug!(%command, dry_run = self.dry_run, "dispatching");
        match command.action() {
            Action::Launch(pipeline) => self.launch(&pipeline, tools()?),
            Action::Clean(kind) => {
                let path = self.settings.layout().path(kind);
                clean(Path::new(&path), self.dry_run).map(Outcome::Cleaned)
            }
            Action::Doc => Ok(Outcome::DocSkipped),
        }
    }

    fn launch(&self, pipeline: &Pipeline, tools: Tools) -> Result<Outcome> {
        let arguments = pipeline.arguments(&self.settings);
        let dependency_paths = tools.supplier.dependency_paths()?;

        let output_dir = self.settings.layout().path(pipeline.output);
        if !self.dry_run {
            ensure_dir(Path::new(&output_dir))?;
        }

        let invocation = Invocation {
            tool: pipeline.tool,
            arguments,
            dependency_paths,
        };
        tools.launcher.launch(&invocation)?;
        Ok(Outcome::Launched(invocation))
    }
}
