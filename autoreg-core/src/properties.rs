// autoreg-core/src/properties.rs
//! Line-oriented `key = value` properties parsing.
//!
//! This is the subset of the Java properties text format that agent
//! configuration files use in practice:
//!
//! * lines whose first non-blank character is `#` or `!` are comments,
//! * blank lines are ignored,
//! * every other line is split on its first unescaped `=`, with whitespace
//!   trimmed from both the key and the value,
//! * `\n`, `\r` and `\r\n` are all accepted as line terminators, even mixed
//!   within one file,
//! * backslash escapes (`\t`, `\n`, `\uXXXX`, `\=`, ...) are decoded and a line
//!   ending in an unescaped backslash continues onto the next one.
//!
//! License: MIT OR Apache-2.0

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use crate::errors::{AutoRegisterError, Result};

/// A single physical line of text together with the terminator that ended it.
///
/// The final line of a file that does not end in a newline has an empty
/// `ending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub content: &'a str,
    pub ending: &'a str,
}

/// Splits `text` into physical lines, keeping each line's own terminator.
///
/// Concatenating `content` and `ending` of every returned line reproduces
/// `text` exactly.
pub fn lines_with_endings(text: &str) -> Vec<Line<'_>> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(Line { content: &text[start..i], ending: &text[i..i + 1] });
                i += 1;
                start = i;
            }
            b'\r' => {
                let end = if bytes.get(i + 1) == Some(&b'\n') { i + 2 } else { i + 1 };
                lines.push(Line { content: &text[start..i], ending: &text[i..end] });
                i = end;
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        lines.push(Line { content: &text[start..], ending: "" });
    }

    lines
}

/// Reads a whole properties file, which must be UTF-8.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AutoRegisterError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| AutoRegisterError::NotUtf8 { path: path.to_path_buf() })
}

/// Returns true if the (left-trimmed) line is a comment.
pub fn is_comment(stripped: &str) -> bool {
    stripped.starts_with('#') || stripped.starts_with('!')
}

/// Parsed contents of a properties file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Parses properties from text. Never fails: lines that don't look like
    /// assignments are kept as keys with an empty value.
    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        let mut pending: Option<String> = None;

        for line in lines_with_endings(text) {
            let stripped = line.content.trim_start();

            let mut logical = match pending.take() {
                Some(mut acc) => {
                    acc.push_str(stripped);
                    acc
                }
                None => {
                    if stripped.is_empty() || is_comment(stripped) {
                        continue;
                    }
                    stripped.to_string()
                }
            };

            if ends_with_continuation(&logical) {
                logical.pop();
                pending = Some(logical);
                continue;
            }

            insert_entry(&mut entries, &logical);
        }

        if let Some(logical) = pending {
            insert_entry(&mut entries, &logical);
        }

        Properties { entries }
    }

    /// Reads and parses the properties file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = read_text(path)?;

        let properties = Self::parse(&text);
        debug!("Loaded {} properties from {}.", properties.len(), path.display());
        Ok(properties)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Looks up `name`, yielding `""` when it is absent.
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A line continues when it ends in an odd number of backslashes.
pub(crate) fn ends_with_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

fn insert_entry(entries: &mut BTreeMap<String, String>, logical: &str) {
    let (raw_key, raw_value) = match find_separator(logical) {
        Some(idx) => (&logical[..idx], &logical[idx + 1..]),
        None => (logical, ""),
    };
    entries.insert(unescape_trimmed(raw_key), unescape_trimmed(raw_value));
}

/// Byte offset of the first `=` not preceded by an escaping backslash.
fn find_separator(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        match c {
            '\\' => escaped = !escaped,
            '=' if !escaped => return Some(idx),
            _ => escaped = false,
        }
    }
    None
}

/// Decodes escapes, then trims whitespace that was not itself escaped.
fn unescape_trimmed(raw: &str) -> String {
    let decoded = unescape(raw);
    let start = decoded
        .iter()
        .position(|(c, escaped)| *escaped || !c.is_whitespace())
        .unwrap_or(decoded.len());
    let end = decoded
        .iter()
        .rposition(|(c, escaped)| *escaped || !c.is_whitespace())
        .map_or(start, |idx| idx + 1);

    decoded[start..end.max(start)].iter().map(|(c, _)| *c).collect()
}

/// Decodes backslash escapes. Each output char is flagged with whether it
/// came from an escape sequence.
fn unescape(raw: &str) -> Vec<(char, bool)> {
    let mut out = Vec::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push((c, false));
            continue;
        }

        match chars.next() {
            // A dangling backslash is dropped.
            None => {}
            Some('t') => out.push(('\t', true)),
            Some('n') => out.push(('\n', true)),
            Some('r') => out.push(('\r', true)),
            Some('f') => out.push(('\u{000C}', true)),
            Some('u') => {
                let mut digits = String::with_capacity(4);
                while digits.len() < 4 {
                    match chars.peek() {
                        Some(d) if d.is_ascii_hexdigit() => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                let decoded = if digits.len() == 4 {
                    u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
                } else {
                    None
                };

                match decoded {
                    Some(ch) => out.push((ch, true)),
                    None => {
                        out.push(('\\', false));
                        out.push(('u', false));
                        out.extend(digits.chars().map(|d| (d, false)));
                    }
                }
            }
            Some(other) => out.push((other, true)),
        }
    }

    out
}
