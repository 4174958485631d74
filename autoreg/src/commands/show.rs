//! `autoreg show` - prints the auto-registration settings of a properties file.

use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

use autoreg_core::{
    AgentAutoRegistrationProperties, AutoRegistrationPropertiesReader,
    AGENT_AUTO_REGISTER_ELASTIC_AGENT_ID, AGENT_AUTO_REGISTER_ELASTIC_PLUGIN_ID,
    AGENT_AUTO_REGISTER_ENVIRONMENTS, AGENT_AUTO_REGISTER_HOSTNAME, AGENT_AUTO_REGISTER_KEY,
    AGENT_AUTO_REGISTER_RESOURCES,
};

use crate::cli::ShowCommand;

const NOT_SET: &str = "(not set)";

/// Writes the settings held by `reader` to `out`.
pub fn run_show<W: Write>(
    reader: &AutoRegistrationPropertiesReader,
    opts: &ShowCommand,
    out: &mut W,
) -> Result<()> {
    debug!("Showing auto-registration properties from {}", reader.path().display());
    let snapshot = reader.snapshot(opts.reveal_key);

    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &snapshot)
            .context("Failed to serialize auto-registration properties")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "file: {}", reader.path().display())?;
    let rows = [
        (AGENT_AUTO_REGISTER_KEY, snapshot.key.as_str()),
        (AGENT_AUTO_REGISTER_RESOURCES, reader.agent_auto_register_resources()),
        (AGENT_AUTO_REGISTER_ENVIRONMENTS, reader.agent_auto_register_environments()),
        (AGENT_AUTO_REGISTER_HOSTNAME, reader.agent_auto_register_hostname()),
        (AGENT_AUTO_REGISTER_ELASTIC_AGENT_ID, reader.agent_auto_register_elastic_agent_id()),
        (AGENT_AUTO_REGISTER_ELASTIC_PLUGIN_ID, reader.agent_auto_register_elastic_plugin_id()),
    ];
    for (name, value) in rows {
        let value = if value.is_empty() { NOT_SET } else { value };
        writeln!(out, "{} = {}", name, value)?;
    }
    Ok(())
}
