//! Per-command argument pipelines.
//!
//! Each launching command is a [`Pipeline`]: the tool to run, the output
//! directory it writes to, and the ordered [`OptionKind`]s whose rendered
//! tokens form the tool's argument list. The kinds are shared, so build and
//! test differ only in which ones they list and in what order.

use tracing::{debug, warn};

use crate::config::Settings;
use crate::layout::{OutputKind, OutputLayout};
use crate::options::{ArgumentList, Opt};
use crate::toolchain::Tool;

pub const OUT_PATH: &str = "--out-path=";
pub const SRC_PATH: &str = "--src-path=";
pub const INC_PATH: &str = "--inc-path=";
pub const COMPILER_COMMAND: &str = "--compiler-command=";
pub const LINKER_COMMAND: &str = "--linker-command=";
pub const ASSEMBLER_COMMAND: &str = "--assembler-command=";
pub const C_FLAGS: &str = "--c-flags=";
pub const CPP_FLAGS: &str = "--cpp-flags=";
pub const AS_FLAGS: &str = "--as-flags=";
pub const LD_FLAGS: &str = "--ld-flags=";
pub const CHECK_ADL: &str = "--check-adl";

/// Component wrapper used to render a component as a dot graph.
const DOT_DUMPER: &str = "dot.DumpComponentDot";

/// One renderable option of a command's argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// `component` or `component:binaryName`, positional; an unset
    /// component still forwards `:binaryName`
    Exec,
    /// `dot.DumpComponentDot<component>`, positional
    DrawExec,
    /// `--out-path=` pointing at an output directory
    OutPath(OutputKind),
    /// `--src-path=` with the configured source path
    SrcPath,
    /// `--src-path=` pointing at a dependency output directory
    DependencyPath(OutputKind),
    IncPath,
    TestIncPath,
    /// Test source path, positional
    TestSrcPath,
    Compiler,
    Linker,
    Assembler,
    CFlags,
    CppFlags,
    AsFlags,
    LdFlags,
    CheckAdl,
}

impl OptionKind {
    pub fn render(self, settings: &Settings, layout: &OutputLayout) -> Opt {
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();
        match self {
            OptionKind::Exec => exec_option(settings),
            OptionKind::DrawExec => draw_exec_option(settings),
            OptionKind::OutPath(kind) => Opt::new(OUT_PATH, layout.path(kind)),
            OptionKind::SrcPath => Opt::new(SRC_PATH, &settings.source_path),
            OptionKind::DependencyPath(kind) => Opt::new(SRC_PATH, layout.path(kind)),
            OptionKind::IncPath => Opt::new(INC_PATH, optional(&settings.include_path)),
            OptionKind::TestIncPath => Opt::new(INC_PATH, optional(&settings.test_include_path)),
            OptionKind::TestSrcPath => Opt::positional(&settings.test_source_path),
            OptionKind::Compiler => Opt::new(COMPILER_COMMAND, &settings.compiler_command),
            OptionKind::Linker => Opt::new(LINKER_COMMAND, &settings.linker_command),
            OptionKind::Assembler => Opt::new(ASSEMBLER_COMMAND, &settings.assembler_command),
            OptionKind::CFlags => Opt::new(C_FLAGS, optional(&settings.c_flags)),
            OptionKind::CppFlags => Opt::new(CPP_FLAGS, optional(&settings.cpp_flags)),
            OptionKind::AsFlags => Opt::new(AS_FLAGS, optional(&settings.as_flags)),
            OptionKind::LdFlags => Opt::new(LD_FLAGS, optional(&settings.ld_flags)),
            OptionKind::CheckAdl => Opt::positional(CHECK_ADL),
        }
    }
}

fn exec_option(settings: &Settings) -> Opt {
    match (&settings.executable_component, &settings.binary_name) {
        (Some(component), Some(binary)) => Opt::new(format!("{component}:"), binary),
        (Some(component), None) => Opt::positional(component),
        (None, Some(binary)) => {
            warn!(binary_name = %binary, "binaryName is set without executableComponent");
            Opt::new(":", binary)
        }
        (None, None) => Opt::positional(""),
    }
}

fn draw_exec_option(settings: &Settings) -> Opt {
    match &settings.executable_component {
        Some(component) => Opt::positional(format!("{DOT_DUMPER}<{component}>")),
        None => {
            warn!("executableComponent is not set; drawing without a component to dump");
            Opt::positional("")
        }
    }
}

/// The fixed recipe for one launching command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipeline {
    pub tool: Tool,
    /// Directory created before the tool runs
    pub output: OutputKind,
    pub options: &'static [OptionKind],
}

impl Pipeline {
    pub const BUILD: Pipeline = Pipeline {
        tool: Tool::Compiler,
        output: OutputKind::Binary,
        options: &[
            OptionKind::Exec,
            OptionKind::OutPath(OutputKind::Binary),
            OptionKind::SrcPath,
            OptionKind::DependencyPath(OutputKind::Dependencies),
            OptionKind::IncPath,
            OptionKind::Compiler,
            OptionKind::Linker,
            OptionKind::Assembler,
            OptionKind::CFlags,
            OptionKind::CppFlags,
            OptionKind::AsFlags,
            OptionKind::LdFlags,
        ],
    };

    pub const TEST: Pipeline = Pipeline {
        tool: Tool::TestRunner,
        output: OutputKind::TestBinary,
        options: &[
            OptionKind::OutPath(OutputKind::TestBinary),
            OptionKind::SrcPath,
            OptionKind::DependencyPath(OutputKind::Dependencies),
            OptionKind::DependencyPath(OutputKind::TestDependencies),
            OptionKind::IncPath,
            OptionKind::TestIncPath,
            OptionKind::Compiler,
            OptionKind::Linker,
            OptionKind::Assembler,
            OptionKind::CFlags,
            OptionKind::CppFlags,
            OptionKind::AsFlags,
            OptionKind::LdFlags,
            OptionKind::TestSrcPath,
        ],
    };

    pub const DRAW: Pipeline = Pipeline {
        tool: Tool::Compiler,
        output: OutputKind::Graphic,
        options: &[
            OptionKind::OutPath(OutputKind::Graphic),
            OptionKind::SrcPath,
            OptionKind::DependencyPath(OutputKind::Dependencies),
            OptionKind::DrawExec,
            OptionKind::CheckAdl,
        ],
    };

    /// Render every option in order; empty ones are dropped.
    pub fn arguments(&self, settings: &Settings) -> ArgumentList {
        let layout = settings.layout();
        let mut args = ArgumentList::new();
        for kind in self.options {
            args.append(&kind.render(settings, &layout));
        }
        debug!(tool = %self.tool, args = %args, "assembled arguments");
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSource;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let source: MapSource = pairs.iter().copied().collect();
        Settings::resolve(&source)
    }

    #[test]
    fn test_build_end_to_end() {
        let settings = settings(&[
            ("sourcePath", "src"),
            ("outputDirectory", "out"),
            ("configuration", "Debug"),
            ("compilerCommand", "clang"),
        ]);
        let args = Pipeline::BUILD.arguments(&settings);
        assert_eq!(
            args.as_slice(),
            [
                "--out-path=out/Debug/binary",
                "--src-path=src",
                "--src-path=out/Debug/dependencies",
                "--compiler-command=clang",
                "--linker-command=clang",
                "--assembler-command=clang",
            ]
        );
        assert!(!args.as_slice().iter().any(|a| a.starts_with("--c-flags=")
            || a.starts_with("--cpp-flags=")
            || a.starts_with("--as-flags=")
            || a.starts_with("--ld-flags=")));
    }

    #[test]
    fn test_build_full_order() {
        let settings = settings(&[
            ("executableComponent", "App"),
            ("binaryName", "app.bin"),
            ("includePath", "inc"),
            ("cFlags", "-O2"),
            ("cppFlags", "-DX"),
            ("asFlags", "-a"),
            ("ldFlags", "-lm"),
        ]);
        let args = Pipeline::BUILD.arguments(&settings);
        assert_eq!(
            args.as_slice(),
            [
                "App:app.bin",
                "--out-path=target/Default/binary",
                "--src-path=src/main/mind",
                "--src-path=target/Default/dependencies",
                "--inc-path=inc",
                "--compiler-command=gcc",
                "--linker-command=gcc",
                "--assembler-command=gcc",
                "--c-flags=-O2",
                "--cpp-flags=-DX",
                "--as-flags=-a",
                "--ld-flags=-lm",
            ]
        );
    }

    #[test]
    fn test_exec_naming() {
        let layout = OutputLayout::new("target", "Default");
        let with_binary = settings(&[("executableComponent", "App"), ("binaryName", "app.bin")]);
        assert_eq!(
            OptionKind::Exec.render(&with_binary, &layout).render().as_deref(),
            Some("App:app.bin")
        );

        let bare = settings(&[("executableComponent", "App"), ("binaryName", "")]);
        assert_eq!(
            OptionKind::Exec.render(&bare, &layout).render().as_deref(),
            Some("App")
        );

        let none = settings(&[]);
        assert_eq!(OptionKind::Exec.render(&none, &layout).render(), None);
    }

    #[test]
    fn test_binary_name_without_component_is_forwarded() {
        let settings = settings(&[("binaryName", "app.bin")]);
        let args = Pipeline::BUILD.arguments(&settings);
        assert_eq!(args.as_slice()[0], ":app.bin");
        assert_eq!(args.as_slice()[1], "--out-path=target/Default/binary");
    }

    #[test]
    fn test_test_pipeline_order() {
        let settings = settings(&[
            ("configuration", "Debug"),
            ("outputDirectory", "out"),
            ("includePath", "inc"),
            ("testIncludePath", "tinc"),
            ("testSourcePath", "tests"),
        ]);
        let args = Pipeline::TEST.arguments(&settings);
        assert_eq!(
            args.as_slice(),
            [
                "--out-path=out/Debug/test-binary",
                "--src-path=src/main/mind",
                "--src-path=out/Debug/dependencies",
                "--src-path=out/Debug/test-dependencies",
                "--inc-path=inc",
                "--inc-path=tinc",
                "--compiler-command=gcc",
                "--linker-command=gcc",
                "--assembler-command=gcc",
                "tests",
            ]
        );
    }

    #[test]
    fn test_test_pipeline_ignores_executable() {
        let settings = settings(&[("executableComponent", "App")]);
        let args = Pipeline::TEST.arguments(&settings);
        assert!(!args.contains("App"));
        assert_eq!(args.as_slice().last().map(String::as_str), Some("src/test/mind"));
    }

    #[test]
    fn test_draw_pipeline() {
        let settings = settings(&[("executableComponent", "helloworld.Helloworld")]);
        let args = Pipeline::DRAW.arguments(&settings);
        assert_eq!(
            args.as_slice(),
            [
                "--out-path=target/Default/graphic",
                "--src-path=src/main/mind",
                "--src-path=target/Default/dependencies",
                "dot.DumpComponentDot<helloworld.Helloworld>",
                "--check-adl",
            ]
        );
    }

    #[test]
    fn test_draw_without_component_drops_exec() {
        let args = Pipeline::DRAW.arguments(&Settings::default());
        assert_eq!(
            args.as_slice(),
            [
                "--out-path=target/Default/graphic",
                "--src-path=src/main/mind",
                "--src-path=target/Default/dependencies",
                "--check-adl",
            ]
        );
    }

    #[test]
    fn test_pipeline_tools_and_outputs() {
        assert_eq!(Pipeline::BUILD.tool, Tool::Compiler);
        assert_eq!(Pipeline::DRAW.tool, Tool::Compiler);
        assert_eq!(Pipeline::TEST.tool, Tool::TestRunner);
        assert_eq!(Pipeline::TEST.output, OutputKind::TestBinary);
        assert_eq!(Pipeline::DRAW.output, OutputKind::Graphic);
    }
}
