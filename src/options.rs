//! Property resolution and option rendering.
//!
//! A [`Property`] is a named setting with a default that a
//! [`PropertySource`] may override. An [`Opt`] pairs a flag prefix with a
//! value and renders to a single command-line token, or to nothing when the
//! value is empty. [`ArgumentList`] collects rendered tokens in call order.

use std::fmt;

use crate::config::PropertySource;

/// A named build setting holding either its default or the source's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: &'static str,
    pub value: String,
}

impl Property {
    pub fn new(key: &'static str, default: impl Into<String>) -> Self {
        Self {
            key,
            value: default.into(),
        }
    }

    /// Replace the value, unless the candidate is absent or empty.
    pub fn set_value(&mut self, candidate: Option<String>) {
        if let Some(value) = candidate
            && !value.is_empty()
        {
            self.value = value;
        }
    }

    /// Build the property from `default` and let `source` override it.
    pub fn resolve(key: &'static str, default: &str, source: &dyn PropertySource) -> Self {
        let mut property = Self::new(key, default);
        property.set_value(source.get(key));
        property
    }
}

/// Resolve `key` against `source`, falling back to `default`.
pub fn resolve(key: &'static str, default: &str, source: &dyn PropertySource) -> String {
    Property::resolve(key, default, source).value
}

/// Resolve a key that has no default; absent and empty both yield `None`.
pub fn resolve_optional(key: &'static str, source: &dyn PropertySource) -> Option<String> {
    Some(resolve(key, "", source)).filter(|value| !value.is_empty())
}

/// A flag prefix and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opt {
    pub prefix: String,
    pub value: String,
}

impl Opt {
    pub fn new(prefix: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            value: value.into(),
        }
    }

    /// A positional token: no prefix.
    pub fn positional(value: impl Into<String>) -> Self {
        Self::new(String::new(), value)
    }

    /// `prefix + value`, or `None` when the value is empty.
    pub fn render(&self) -> Option<String> {
        if self.value.is_empty() {
            None
        } else {
            Some(format!("{}{}", self.prefix, self.value))
        }
    }
}

/// Ordered tokens handed to a downstream tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    args: Vec<String>,
}

impl ArgumentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the rendered option; empty options are filtered out.
    pub fn append(&mut self, opt: &Opt) {
        if let Some(token) = opt.render() {
            self.args.push(token);
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    pub fn contains(&self, token: &str) -> bool {
        self.args.iter().any(|arg| arg == token)
    }
}

impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args.join(" "))
    }
}
