//! Output directory layout.
//!
//! Every output lands under `<outputDirectory>/<configuration>/<kind>`. Paths
//! are plain string concatenation with `/`; nothing here touches the disk.

use std::fmt;

/// One of the per-configuration output subdirectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Binary,
    TestBinary,
    Graphic,
    Dependencies,
    TestDependencies,
}

impl OutputKind {
    pub const ALL: [OutputKind; 5] = [
        OutputKind::Binary,
        OutputKind::TestBinary,
        OutputKind::Graphic,
        OutputKind::Dependencies,
        OutputKind::TestDependencies,
    ];

    pub fn dir_name(self) -> &'static str {
        match self {
            OutputKind::Binary => "binary",
            OutputKind::TestBinary => "test-binary",
            OutputKind::Graphic => "graphic",
            OutputKind::Dependencies => "dependencies",
            OutputKind::TestDependencies => "test-dependencies",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Output paths for one `outputDirectory` / `configuration` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    base: String,
}

impl OutputLayout {
    pub fn new(output_directory: &str, configuration: &str) -> Self {
        Self {
            base: format!("{output_directory}/{configuration}"),
        }
    }

    pub fn path(&self, kind: OutputKind) -> String {
        format!("{}/{}", self.base, kind.dir_name())
    }

    pub fn binary(&self) -> String {
        self.path(OutputKind::Binary)
    }

    pub fn test_binary(&self) -> String {
        self.path(OutputKind::TestBinary)
    }

    pub fn graphic(&self) -> String {
        self.path(OutputKind::Graphic)
    }

    pub fn dependencies(&self) -> String {
        self.path(OutputKind::Dependencies)
    }

    pub fn test_dependencies(&self) -> String {
        self.path(OutputKind::TestDependencies)
    }
}
