// autoreg-core/src/scrub.rs
//! Destructive redaction of auto-registration properties.
//!
//! Each assignment of the registration key, resources, environments or
//! hostname is replaced with an explanatory comment followed by the original
//! line, commented out. An assignment continued with trailing backslashes is
//! commented out on every physical line it spans. Every other line, terminator
//! included, is copied through byte for byte.
//!
//! License: MIT OR Apache-2.0

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AutoRegisterError, Result};
use crate::properties::{ends_with_continuation, is_comment, lines_with_endings, read_text};
use crate::registration::{AGENT_AUTO_REGISTER_KEY, SCRUBBED_KEYS};

/// Comment placed above the scrubbed registration key.
pub const KEY_REMOVED_COMMENT: &str =
    "# The autoregister key has been intentionally removed by Go as a security measure.";

/// Comment placed above every other scrubbed property.
pub const PROPERTY_REMOVED_COMMENT: &str =
    "# This property has been removed by Go after attempting to auto-register with the Go server.";

const TMP_EXTENSION: &str = "tmp";

static ASSIGNMENT_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SCRUBBED_KEYS
        .iter()
        .map(|key| {
            let pattern = format!(r"^\s*{}\s*=", regex::escape(key));
            let regex = Regex::new(&pattern).expect("assignment pattern is a valid regex");
            (*key, regex)
        })
        .collect()
});

/// What a scrub changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrubReport {
    /// The rewritten file contents.
    pub contents: String,
    /// Names of the properties that were commented out, in file order.
    /// A key assigned several times appears once per assignment.
    pub scrubbed_keys: Vec<&'static str>,
}

impl ScrubReport {
    /// Number of assignments commented out.
    pub fn scrubbed_lines(&self) -> usize {
        self.scrubbed_keys.len()
    }

    pub fn is_unchanged(&self) -> bool {
        self.scrubbed_keys.is_empty()
    }
}

/// Returns the scrubbed property assigned on `line`, if any.
///
/// Only meaningful for a line that starts a new logical line.
pub fn recognized_assignment(line: &str) -> Option<&'static str> {
    ASSIGNMENT_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(line))
        .map(|(key, _)| *key)
}

fn removal_comment(key: &str) -> &'static str {
    if key == AGENT_AUTO_REGISTER_KEY {
        KEY_REMOVED_COMMENT
    } else {
        PROPERTY_REMOVED_COMMENT
    }
}

/// Scrubs properties text without touching the filesystem.
pub fn scrub_contents(text: &str) -> ScrubReport {
    let mut contents = String::with_capacity(text.len() + 256);
    let mut scrubbed_keys = Vec::new();
    // Set while the previous physical line ended in a continuation.
    let mut continuing = false;
    // Whether the logical line being continued is being commented out.
    let mut commenting = false;

    for line in lines_with_endings(text) {
        if continuing {
            if commenting {
                contents.push_str("# ");
            }
            contents.push_str(line.content);
            contents.push_str(line.ending);
            continuing = ends_with_continuation(line.content);
            continue;
        }

        let stripped = line.content.trim_start();
        continuing = !stripped.is_empty() && !is_comment(stripped) && ends_with_continuation(stripped);

        match recognized_assignment(line.content) {
            Some(key) => {
                commenting = true;
                let comment_ending = if line.ending.is_empty() { "\n" } else { line.ending };
                contents.push_str(removal_comment(key));
                contents.push_str(comment_ending);
                contents.push_str("# ");
                contents.push_str(line.content);
                contents.push_str(line.ending);
                scrubbed_keys.push(key);
            }
            None => {
                commenting = false;
                contents.push_str(line.content);
                contents.push_str(line.ending);
            }
        }
    }

    ScrubReport { contents, scrubbed_keys }
}

/// Scrubs the properties file at `path` in place.
///
/// The new contents are written to a sibling temporary file which then
/// replaces the original, keeping the original's permissions. Nothing is
/// written when no recognized property is present.
pub fn scrub_file<P: AsRef<Path>>(path: P) -> Result<ScrubReport> {
    let path = path.as_ref();
    info!("Scrubbing auto-registration properties in {}", path.display());

    let text = read_text(path)?;

    let report = scrub_contents(&text);
    if report.is_unchanged() {
        debug!("No auto-registration properties found in {}; leaving it untouched.", path.display());
        return Ok(report);
    }

    write_replacing(path, report.contents.as_bytes())?;
    info!(
        "Scrubbed {} auto-registration properties from {}: {:?}",
        report.scrubbed_lines(),
        path.display(),
        report.scrubbed_keys
    );
    Ok(report)
}

/// Computes what [`scrub_file`] would write, leaving the file alone.
pub fn preview_scrub<P: AsRef<Path>>(path: P) -> Result<ScrubReport> {
    let path = path.as_ref();
    let report = scrub_contents(&read_text(path)?);
    debug!("Scrub preview: {} assignments in {}", report.scrubbed_lines(), path.display());
    Ok(report)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) => path.with_extension(format!("{}.{}", ext.to_string_lossy(), TMP_EXTENSION)),
        None => path.with_extension(TMP_EXTENSION),
    }
}

fn write_replacing(path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source| AutoRegisterError::Write { path: path.to_path_buf(), source };
    let tmp_path = tmp_path_for(path);

    let result = (|| -> std::io::Result<()> {
        let permissions = fs::metadata(path)?.permissions();
        {
            let mut tmp = OpenOptions::new().create(true).write(true).truncate(true).open(&tmp_path)?;
            tmp.write_all(contents)?;
            tmp.sync_all()?;
        }
        fs::set_permissions(&tmp_path, permissions)?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() && tmp_path.exists() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            warn!("Failed to remove temporary file {}: {}", tmp_path.display(), e);
        }
    }

    result.map_err(write_err)
}
