//! Build settings.
//!
//! Settings come either from a properties file or, when no file is given,
//! from the process environment. Both are read through [`PropertySource`],
//! and [`load`] turns the chosen source into a typed [`Settings`] record in
//! one step.

pub mod properties;
pub mod settings;

pub use properties::load_properties_file;
pub use settings::{Settings, keys};

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;

/// A key/value lookup that build properties are resolved against.
pub trait PropertySource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Properties held in memory, typically loaded from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl From<HashMap<String, String>> for MapSource {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The process environment, looked up by exact key name.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl PropertySource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| env_value(key, value))
    }
}

fn env_value(key: &str, value: OsString) -> String {
    value.into_string().unwrap_or_else(|raw| {
        warn!(key, "environment value is not valid UTF-8; invalid bytes replaced");
        raw.to_string_lossy().into_owned()
    })
}

/// Load and resolve the build settings.
///
/// With a path, the properties file is read (missing or unreadable files are
/// errors) and keys the builder does not know about are reported. Without
/// one, settings are read from the environment.
pub fn load(properties: Option<&Path>) -> Result<Settings> {
    match properties {
        Some(path) => {
            let source = load_properties_file(path)?;
            debug!(path = %path.display(), entries = source.len(), "loaded properties file");
            for key in source.keys().filter(|key| !keys::is_known(key)) {
                warn!(key, path = %path.display(), "ignoring unknown property");
            }
            Ok(Settings::resolve(&source))
        }
        None => {
            debug!("no properties file given, reading settings from the environment");
            Ok(Settings::resolve(&EnvSource))
        }
    }
}
