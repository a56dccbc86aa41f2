//! Properties file reader.
//!
//! Reads `key=value`, `key:value` and `key value` lines in file order, with
//! `#`/`!` comments, backslash continuations and the standard escapes.

use std::path::Path;

use tracing::debug;

use crate::core::constants::PUBLIC_KEY_PREFIX;
use crate::core::domain::Entries;
use crate::error::{LoadError, Result};

/// Read a properties file from disk.
///
/// # Errors
///
/// Returns `LoadError::ReadFailed` if the file cannot be read.
pub fn load(path: impl AsRef<Path>) -> Result<Entries> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse(&contents);

    debug!(path = %path.display(), entries = entries.len(), "properties file parsed");

    Ok(entries)
}

/// Parse properties contents into an ordered entry set.
pub fn parse(contents: &str) -> Entries {
    let mut entries = Entries::new();

    for logical in logical_lines(contents) {
        let (key, value) = split_key_value(&logical);
        entries.insert(unescape(key), unescape(value));
    }

    entries
}

/// First non-empty value whose key starts with `dotenv.public.key`.
pub fn declared_public_key(entries: &Entries) -> Option<&str> {
    entries
        .iter()
        .filter(|e| e.key.starts_with(PUBLIC_KEY_PREFIX))
        .map(|e| e.value.as_str())
        .find(|v| !v.is_empty())
}

/// Join continuation lines and drop blanks and comments.
fn logical_lines(contents: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in contents.lines() {
        let trimmed = raw.trim_start();

        let Some(mut buf) = current.take() else {
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            if ends_with_continuation(trimmed) {
                current = Some(trimmed[..trimmed.len() - 1].to_string());
            } else {
                lines.push(trimmed.to_string());
            }
            continue;
        };

        if ends_with_continuation(trimmed) {
            buf.push_str(&trimmed[..trimmed.len() - 1]);
            current = Some(buf);
        } else {
            buf.push_str(trimmed);
            lines.push(buf);
        }
    }

    if let Some(buf) = current {
        lines.push(buf);
    }

    lines
}

/// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split at the first unescaped `=`, `:` or whitespace.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;

    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..idx], line[idx + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[idx..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .map(str::trim_start)
                    .unwrap_or(rest);
                return (&line[..idx], rest);
            }
            _ => {}
        }
    }

    (line, "")
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => out.push(c),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}
