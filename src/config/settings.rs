use serde::Serialize;

use super::PropertySource;
use crate::layout::OutputLayout;
use crate::options::{resolve, resolve_optional};

/// Recognized property keys and their defaults.
pub mod keys {
    pub const CONFIGURATION: &str = "configuration";
    pub const EXECUTABLE_COMPONENT: &str = "executableComponent";
    pub const BINARY_NAME: &str = "binaryName";
    pub const OUTPUT_DIRECTORY: &str = "outputDirectory";
    pub const SOURCE_PATH: &str = "sourcePath";
    pub const TEST_SOURCE_PATH: &str = "testSourcePath";
    pub const INCLUDE_PATH: &str = "includePath";
    pub const TEST_INCLUDE_PATH: &str = "testIncludePath";
    pub const COMPILER_COMMAND: &str = "compilerCommand";
    pub const LINKER_COMMAND: &str = "linkerCommand";
    pub const ASSEMBLER_COMMAND: &str = "assemblerCommand";
    pub const C_FLAGS: &str = "cFlags";
    pub const CPP_FLAGS: &str = "cppFlags";
    pub const LD_FLAGS: &str = "ldFlags";
    pub const AS_FLAGS: &str = "asFlags";
    pub const EXTRA_OPTIONS: &str = "extraOptions";

    pub const ALL: [&str; 16] = [
        CONFIGURATION,
        EXECUTABLE_COMPONENT,
        BINARY_NAME,
        OUTPUT_DIRECTORY,
        SOURCE_PATH,
        TEST_SOURCE_PATH,
        INCLUDE_PATH,
        TEST_INCLUDE_PATH,
        COMPILER_COMMAND,
        LINKER_COMMAND,
        ASSEMBLER_COMMAND,
        C_FLAGS,
        CPP_FLAGS,
        LD_FLAGS,
        AS_FLAGS,
        EXTRA_OPTIONS,
    ];

    pub const DEFAULT_CONFIGURATION: &str = "Default";
    pub const DEFAULT_OUTPUT_DIRECTORY: &str = "target";
    pub const DEFAULT_SOURCE_PATH: &str = "src/main/mind";
    pub const DEFAULT_TEST_SOURCE_PATH: &str = "src/test/mind";
    pub const DEFAULT_COMPILER_COMMAND: &str = "gcc";

    pub fn is_known(key: &str) -> bool {
        ALL.contains(&key)
    }
}

/// Fully resolved build settings.
///
/// Keys with a default are plain strings; keys without one are `None` when
/// the source leaves them unset or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub configuration: String,
    pub executable_component: Option<String>,
    pub binary_name: Option<String>,
    pub output_directory: String,
    pub source_path: String,
    pub test_source_path: String,
    pub include_path: Option<String>,
    pub test_include_path: Option<String>,
    pub compiler_command: String,
    /// Defaults to the resolved compiler command
    pub linker_command: String,
    /// Defaults to the resolved compiler command
    pub assembler_command: String,
    pub c_flags: Option<String>,
    pub cpp_flags: Option<String>,
    pub ld_flags: Option<String>,
    pub as_flags: Option<String>,
    /// Accepted but not forwarded to any tool yet
    pub extra_options: Option<String>,
}

impl Settings {
    pub fn resolve(source: &dyn PropertySource) -> Self {
        let compiler_command = resolve(keys::COMPILER_COMMAND, keys::DEFAULT_COMPILER_COMMAND, source);
        let linker_command = resolve(keys::LINKER_COMMAND, &compiler_command, source);
        let assembler_command = resolve(keys::ASSEMBLER_COMMAND, &compiler_command, source);

        Self {
            configuration: resolve(keys::CONFIGURATION, keys::DEFAULT_CONFIGURATION, source),
            executable_component: resolve_optional(keys::EXECUTABLE_COMPONENT, source),
            binary_name: resolve_optional(keys::BINARY_NAME, source),
            output_directory: resolve(keys::OUTPUT_DIRECTORY, keys::DEFAULT_OUTPUT_DIRECTORY, source),
            source_path: resolve(keys::SOURCE_PATH, keys::DEFAULT_SOURCE_PATH, source),
            test_source_path: resolve(keys::TEST_SOURCE_PATH, keys::DEFAULT_TEST_SOURCE_PATH, source),
            include_path: resolve_optional(keys::INCLUDE_PATH, source),
            test_include_path: resolve_optional(keys::TEST_INCLUDE_PATH, source),
            compiler_command,
            linker_command,
            assembler_command,
            c_flags: resolve_optional(keys::C_FLAGS, source),
            cpp_flags: resolve_optional(keys::CPP_FLAGS, source),
            ld_flags: resolve_optional(keys::LD_FLAGS, source),
            as_flags: resolve_optional(keys::AS_FLAGS, source),
            extra_options: resolve_optional(keys::EXTRA_OPTIONS, source),
        }
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.output_directory, &self.configuration)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(&super::MapSource::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSource;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.configuration, "Default");
        assert_eq!(settings.output_directory, "target");
        assert_eq!(settings.source_path, "src/main/mind");
        assert_eq!(settings.test_source_path, "src/test/mind");
        assert_eq!(settings.compiler_command, "gcc");
        assert_eq!(settings.linker_command, "gcc");
        assert_eq!(settings.assembler_command, "gcc");
        assert_eq!(settings.executable_component, None);
        assert_eq!(settings.c_flags, None);
        assert_eq!(settings.layout().binary(), "target/Default/binary");
    }

    #[test]
    fn test_linker_and_assembler_follow_overridden_compiler() {
        let source: MapSource = [("compilerCommand", "clang")].into_iter().collect();
        let settings = Settings::resolve(&source);
        assert_eq!(settings.linker_command, "clang");
        assert_eq!(settings.assembler_command, "clang");
    }

    #[test]
    fn test_explicit_linker_wins() {
        let source: MapSource = [
            ("compilerCommand", "clang"),
            ("linkerCommand", "ld.lld"),
            ("assemblerCommand", ""),
        ]
        .into_iter()
        .collect();
        let settings = Settings::resolve(&source);
        assert_eq!(settings.linker_command, "ld.lld");
        assert_eq!(settings.assembler_command, "clang");
    }

    #[test]
    fn test_known_keys() {
        assert!(keys::is_known("cppFlags"));
        assert!(keys::is_known("extraOptions"));
        assert!(!keys::is_known("cflags"));
    }

    #[test]
    fn test_serializes_with_property_names() {
        let source: MapSource = [("cFlags", "-O2")].into_iter().collect();
        let dump = toml::to_string_pretty(&Settings::resolve(&source)).unwrap();
        assert!(dump.contains("compilerCommand = \"gcc\""));
        assert!(dump.contains("cFlags = \"-O2\""));
        assert!(!dump.contains("ldFlags"));
    }
}
