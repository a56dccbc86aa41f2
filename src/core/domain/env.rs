//! Env type.
//!
//! Represents a parsed .env file with ordered, typed access.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::domain::Entries;
use crate::error::{LoadError, Result};

/// A parsed .env file
#[derive(Debug, Clone)]
pub struct Env {
    entries: Entries,
    path: PathBuf,
}

impl Env {
    /// Parse an .env file from disk
    ///
    /// Skips empty lines and comments (lines starting with #).
    /// Supports values with or without quotes and an optional `export ` prefix.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::ReadFailed` if the file cannot be read, or
    /// `LoadError::Malformed` for an invalid line when `strict` is set.
    pub fn load(path: impl AsRef<Path>, strict: bool) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = parse(&contents, strict)?;

        debug!(path = %path.display(), entries = entries.len(), "env file parsed");

        Ok(Self {
            entries,
            path: path.to_path_buf(),
        })
    }

    /// Create from an existing entry set
    pub fn from_entries(entries: Entries, path: PathBuf) -> Self {
        Self { entries, path }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }

    /// All entries in file order
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    /// Consume into the entry set
    pub fn into_entries(self) -> Entries {
        self.entries
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize to .env format string
    ///
    /// Quotes values that contain spaces or special characters.
    fn to_env_string(&self) -> String {
        let mut output = String::new();

        for entry in &self.entries {
            if needs_quotes(&entry.value) {
                output.push_str(&format!(
                    "{}=\"{}\"\n",
                    entry.key,
                    escape_env_value(&entry.value)
                ));
            } else {
                output.push_str(&format!("{}={}\n", entry.key, entry.value));
            }
        }

        output
    }
}

/// Parse .env contents into an ordered entry set.
///
/// Lines without `=` or with an invalid key are rejected in strict mode and
/// skipped otherwise.
pub fn parse(contents: &str, strict: bool) -> Result<Entries> {
    let mut entries = Entries::new();

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);

        let Some((key, value)) = line.split_once('=') else {
            if strict {
                return Err(LoadError::Malformed {
                    line: idx + 1,
                    reason: "missing '='".to_string(),
                }
                .into());
            }
            continue;
        };

        let key = key.trim();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            if strict {
                return Err(LoadError::Malformed {
                    line: idx + 1,
                    reason: format!("invalid key '{}'", key),
                }
                .into());
            }
            continue;
        }

        entries.insert(key, parse_env_value(value.trim()));
    }

    Ok(entries)
}

fn parse_env_value(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix('"') {
        if let Some(end) = closing_double_quote(rest) {
            return unescape_double_quoted(&rest[..end]);
        }
    }

    if let Some(rest) = raw.strip_prefix('\'') {
        if let Some(end) = rest.find('\'') {
            return rest[..end].to_string();
        }
    }

    // Unquoted: drop trailing ` # comment`
    match raw.find(" #") {
        Some(pos) => raw[..pos].trim_end().to_string(),
        None => raw.to_string(),
    }
}

/// Byte offset of the first unescaped `"`.
fn closing_double_quote(value: &str) -> Option<usize> {
    let mut escaped = false;
    for (idx, ch) in value.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(idx),
            _ => {}
        }
    }
    None
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(|ch| ch.is_whitespace())
        || value.contains('#')
        || value.contains('=')
        || value.contains('"')
        || value.contains('\'')
        || value.contains('\\')
}

fn escape_env_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

impl std::fmt::Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_env_string())
    }
}
