//! Line grammar of the sectioned config format.
//!
//! Responsibilities:
//! - Classify a single line as header, assignment, comment or blank.
//! - Strip value quoting on read and decide when quoting is needed on write.
//!
//! Does NOT handle:
//! - File I/O or section bookkeeping (see `store/mod.rs`).
//!
//! Invariants:
//! - A value written with `render_value` reads back unchanged via `parse_value`.

use crate::constants::{COMMENT_PREFIXES, QUOTE_CHARS};

use super::error::SyntaxErrorKind;

/// One classified input line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    Comment,
    Header(&'a str),
    Assignment { key: &'a str, value: &'a str },
}

pub(crate) fn classify_line(raw: &str) -> Result<Line<'_>, SyntaxErrorKind> {
    let line = raw.trim();

    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if line.starts_with(COMMENT_PREFIXES) {
        return Ok(Line::Comment);
    }
    if line.starts_with('[') {
        return parse_header(line).map(Line::Header);
    }

    let Some((key, value)) = line.split_once('=') else {
        return Err(SyntaxErrorKind::UnrecognizedLine);
    };
    let key = key.trim();
    if !is_valid_key(key) {
        return Err(SyntaxErrorKind::InvalidKey);
    }

    Ok(Line::Assignment {
        key,
        value: parse_value(value),
    })
}

fn parse_header(line: &str) -> Result<&str, SyntaxErrorKind> {
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(SyntaxErrorKind::InvalidSectionHeader)?;

    if inner.contains(['[', ']']) {
        return Err(SyntaxErrorKind::InvalidSectionHeader);
    }

    let name = inner.trim();
    if name.is_empty() {
        return Err(SyntaxErrorKind::EmptySectionName);
    }
    Ok(name)
}

pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Returns true if `name` can be written as a `[name]` header and read back.
pub(crate) fn is_valid_section_name(name: &str) -> bool {
    !name.is_empty() && name.trim() == name && !name.contains(['[', ']', '\n', '\r'])
}

/// Trims the raw text after `=` and strips one pair of matching quotes.
pub(crate) fn parse_value(raw: &str) -> &str {
    let value = raw.trim();
    unquote(value).unwrap_or(value)
}

fn unquote(value: &str) -> Option<&str> {
    let first = value.chars().next()?;
    if value.len() < 2 || !QUOTE_CHARS.contains(&first) {
        return None;
    }
    value.strip_prefix(first)?.strip_suffix(first)
}

/// Renders `value` so that `parse_value` returns it unchanged.
pub(crate) fn render_value(value: &str) -> String {
    let needs_quotes = value.is_empty() || value.trim() != value || unquote(value).is_some();
    if needs_quotes {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}
