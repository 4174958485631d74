//! `autoreg scrub` - comments out the auto-registration settings in place.

use anyhow::{Context, Result};
use log::info;
use std::io::Write;

use autoreg_core::{preview_scrub, AgentAutoRegistrationProperties, AutoRegistrationPropertiesReader};

use crate::cli::ScrubCommand;

/// Scrubs the file behind `reader`, reporting the outcome on `out`.
///
/// With `--dry-run` the scrubbed contents are written to `out` and the file
/// is left alone.
pub fn run_scrub<W: Write>(
    reader: &AutoRegistrationPropertiesReader,
    opts: &ScrubCommand,
    out: &mut W,
) -> Result<()> {
    let path = reader.path();

    if opts.dry_run {
        let report = preview_scrub(path)
            .with_context(|| format!("Failed to preview scrub of {}", path.display()))?;
        info!("Dry run: {} assignments would be scrubbed from {}", report.scrubbed_lines(), path.display());
        out.write_all(report.contents.as_bytes())?;
        return Ok(());
    }

    let report = reader
        .scrub_registration_properties()
        .with_context(|| format!("Failed to scrub {}", path.display()))?;

    if report.is_unchanged() {
        writeln!(out, "No auto-registration properties found in {}.", path.display())?;
    } else {
        writeln!(
            out,
            "Scrubbed {} auto-registration properties from {}: {}",
            report.scrubbed_lines(),
            path.display(),
            report.scrubbed_keys.join(", ")
        )?;
    }
    Ok(())
}
