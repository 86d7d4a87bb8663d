//! # mind-builder - Front end for the MIND toolchain
//!
//! mind-builder reads the build settings of a MIND project from a properties
//! file (or the environment), fills in defaults, derives the output layout and
//! hands a ready-made argument list to `mindc` or `mindunit`.
//!
//! ## Quick Start
//!
//! ```bash
//! # Build using Debug.properties; outputs go to target/Debug/binary
//! mind-builder build Debug.properties
//!
//! # Same settings taken from the environment
//! compilerCommand=clang mind-builder build
//!
//! # Remove the test outputs
//! mind-builder clean-test Debug.properties
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Property sources, properties files and the [`Settings`] record
//! - [`options`] - Property resolution and option rendering
//! - [`layout`] - Output directory layout
//! - [`pipeline`] - Per-command argument lists
//! - [`toolchain`] - Install root, dependency paths and tool launching
//! - [`build`] - Command dispatch and output cleanup

/// Command dispatch and output directory handling.
pub mod build;

/// Build settings: property sources and the typed settings record.
pub mod config;

/// Error taxonomy and exit codes.
pub mod error;

/// Output directory layout.
pub mod layout;

/// Property resolution, option rendering and argument lists.
pub mod options;

/// Per-command argument pipelines.
pub mod pipeline;

/// MIND install lookup, dependency discovery and tool launching.
pub mod toolchain;

pub use build::{Command, Dispatcher, Outcome};
pub use config::Settings;
pub use error::{BuilderError, ErrorClass, Result};
