//! Properties file loading.
//!
//! Two formats are accepted: the classic `key=value` properties syntax, and a
//! flat TOML table for files ending in `.toml`. Either way the result is a
//! [`MapSource`] with `configuration` filled in from the file name when the
//! file does not set it.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use super::{MapSource, PropertySource, keys};
use crate::error::{BuilderError, Result};

/// A malformed entry in a properties file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

/// Read `path` into a property source.
pub fn load_properties_file(path: &Path) -> Result<MapSource> {
    if !path.exists() {
        return Err(BuilderError::PropertiesNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| BuilderError::PropertiesUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode(bytes);

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let entries = if is_toml {
        parse_toml(&text)
    } else {
        parse(&text).map_err(|e| e.to_string())
    }
    .map_err(|message| BuilderError::PropertiesParse {
        path: path.to_path_buf(),
        message,
    })?;

    let mut source = MapSource::from(entries);
    let configured = source
        .get(keys::CONFIGURATION)
        .is_some_and(|value| !value.is_empty());
    if !configured && let Some(stem) = path.file_stem() {
        source.insert(keys::CONFIGURATION, stem.to_string_lossy());
    }
    Ok(source)
}

/// UTF-8 when valid, otherwise ISO-8859-1 (one char per byte).
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("properties file is not UTF-8, reading it as ISO-8859-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Split on `\r\n`, `\n` or a bare `\r`.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(end) => {
                let line = &rest[..end];
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator..];
                Some(line)
            }
            None => Some(std::mem::take(&mut rest)),
        }
    })
}

/// Parse `key=value` properties text. Later keys override earlier ones.
pub fn parse(text: &str) -> std::result::Result<HashMap<String, String>, SyntaxError> {
    let mut entries = HashMap::new();
    let mut lines = lines(text).enumerate();

    while let Some((index, raw)) = lines.next() {
        let line = raw.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let line_number = index + 1;
        let mut logical = line.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        entries.insert(unescape(key, line_number)?, unescape(value, line_number)?);
    }

    Ok(entries)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// An odd number of trailing backslashes joins the next line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                let value = line[index + 1..].trim_start_matches(is_blank);
                return (&line[..index], value);
            }
            c if is_blank(c) => {
                let rest = line[index..].trim_start_matches(is_blank);
                let value = rest
                    .strip_prefix(['=', ':'])
                    .unwrap_or(rest)
                    .trim_start_matches(is_blank);
                return (&line[..index], value);
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(raw: &str, line: usize) -> std::result::Result<String, SyntaxError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit()))
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| SyntaxError {
                        line,
                        message: format!("malformed \\uXXXX escape `\\u{hex}`"),
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn parse_toml(text: &str) -> std::result::Result<HashMap<String, String>, String> {
    let table: toml::Table = toml::from_str(text).map_err(|e| e.to_string())?;
    let mut entries = HashMap::new();
    for (key, value) in table {
        match scalar_text(&value) {
            Some(text) => {
                entries.insert(key, text);
            }
            None => warn!(key = %key, "ignoring non-scalar TOML property"),
        }
    }
    Ok(entries)
}

fn scalar_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(" ")),
        _ => None,
    }
}
