// autoreg-core/src/registration.rs
//! Auto-registration settings read from an agent's properties file.
//!
//! An agent that auto-registers with its server finds a shared secret and a
//! few registration hints in a local properties file. This module exposes
//! those values through the [`AgentAutoRegistrationProperties`] trait and
//! provides the file-backed [`AutoRegistrationPropertiesReader`].
//!
//! The file is read exactly once, when the reader is built. Scrubbing changes
//! the file on disk and leaves the values already read untouched.
//!
//! License: MIT OR Apache-2.0

use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use serde::Serialize;

use crate::errors::Result;
use crate::properties::Properties;
use crate::scrub::{scrub_file, ScrubReport};

/// Shared secret used once to register the agent.
pub const AGENT_AUTO_REGISTER_KEY: &str = "agent.auto.register.key";
/// Comma-separated resource tags.
pub const AGENT_AUTO_REGISTER_RESOURCES: &str = "agent.auto.register.resources";
/// Comma-separated environment tags.
pub const AGENT_AUTO_REGISTER_ENVIRONMENTS: &str = "agent.auto.register.environments";
/// Hostname override.
pub const AGENT_AUTO_REGISTER_HOSTNAME: &str = "agent.auto.register.hostname";
/// Identifier handed to an elastic agent by the plugin that launched it.
pub const AGENT_AUTO_REGISTER_ELASTIC_AGENT_ID: &str = "agent.auto.register.elasticAgent.agentId";
/// Plugin that launched an elastic agent.
pub const AGENT_AUTO_REGISTER_ELASTIC_PLUGIN_ID: &str = "agent.auto.register.elasticAgent.pluginId";

/// Every property the reader exposes.
pub const RECOGNIZED_KEYS: [&str; 6] = [
    AGENT_AUTO_REGISTER_KEY,
    AGENT_AUTO_REGISTER_RESOURCES,
    AGENT_AUTO_REGISTER_ENVIRONMENTS,
    AGENT_AUTO_REGISTER_HOSTNAME,
    AGENT_AUTO_REGISTER_ELASTIC_AGENT_ID,
    AGENT_AUTO_REGISTER_ELASTIC_PLUGIN_ID,
];

/// Properties commented out by a scrub. The elastic agent settings stay live.
pub const SCRUBBED_KEYS: [&str; 4] = [
    AGENT_AUTO_REGISTER_KEY,
    AGENT_AUTO_REGISTER_RESOURCES,
    AGENT_AUTO_REGISTER_ENVIRONMENTS,
    AGENT_AUTO_REGISTER_HOSTNAME,
];

/// Location of the properties file relative to the agent's working directory.
pub const DEFAULT_PROPERTIES_PATH: &str = "config/autoregister.properties";

/// Read access to auto-registration settings, plus the one-shot scrub.
///
/// Every lookup returns the trimmed value, or an empty string when the
/// property is not set.
pub trait AgentAutoRegistrationProperties {
    fn agent_auto_register_key(&self) -> &str;

    fn agent_auto_register_resources(&self) -> &str;

    fn agent_auto_register_environments(&self) -> &str;

    fn agent_auto_register_hostname(&self) -> &str;

    fn agent_auto_register_elastic_agent_id(&self) -> &str;

    fn agent_auto_register_elastic_plugin_id(&self) -> &str;

    /// Comments out the registration key, resources, environments and
    /// hostname in the backing file.
    ///
    /// Destructive and one-way. Properties missing from the file are left
    /// alone; a missing or unwritable file is an error.
    fn scrub_registration_properties(&self) -> Result<ScrubReport>;
}

/// [`AgentAutoRegistrationProperties`] backed by a properties file on disk.
#[derive(Debug, Clone)]
pub struct AutoRegistrationPropertiesReader {
    path: PathBuf,
    properties: Properties,
}

impl AutoRegistrationPropertiesReader {
    /// Reads the properties file at `path`.
    ///
    /// Construction never fails. A missing file, or one that can't be read,
    /// behaves like an empty file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let properties = match Properties::load(&path) {
            Ok(properties) => properties,
            Err(e) if e.is_not_found() => {
                warn!("Auto-registration properties file {} does not exist.", path.display());
                Properties::default()
            }
            Err(e) => {
                error!("Could not read auto-registration properties: {}", e);
                Properties::default()
            }
        };

        debug!(
            "Auto-registration properties present in {}: {:?}",
            path.display(),
            RECOGNIZED_KEYS.iter().filter(|k| properties.contains_key(k)).collect::<Vec<_>>()
        );

        AutoRegistrationPropertiesReader { path, properties }
    }

    /// Builds a reader over already-parsed properties.
    pub fn from_properties<P: Into<PathBuf>>(path: P, properties: Properties) -> Self {
        AutoRegistrationPropertiesReader { path: path.into(), properties }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn resource_tags(&self) -> Vec<String> {
        split_tags(self.agent_auto_register_resources())
    }

    pub fn environment_tags(&self) -> Vec<String> {
        split_tags(self.agent_auto_register_environments())
    }

    /// Copies every setting into a [`RegistrationSnapshot`]. The registration
    /// key is masked unless `reveal_key` is set.
    pub fn snapshot(&self, reveal_key: bool) -> RegistrationSnapshot {
        let key = self.agent_auto_register_key();
        RegistrationSnapshot {
            key: if reveal_key || key.is_empty() { key.to_string() } else { redact_sensitive(key) },
            resources: self.resource_tags(),
            environments: self.environment_tags(),
            hostname: self.agent_auto_register_hostname().to_string(),
            elastic_agent_id: self.agent_auto_register_elastic_agent_id().to_string(),
            elastic_plugin_id: self.agent_auto_register_elastic_plugin_id().to_string(),
        }
    }
}

impl AgentAutoRegistrationProperties for AutoRegistrationPropertiesReader {
    fn agent_auto_register_key(&self) -> &str {
        self.properties.get_or_empty(AGENT_AUTO_REGISTER_KEY)
    }

    fn agent_auto_register_resources(&self) -> &str {
        self.properties.get_or_empty(AGENT_AUTO_REGISTER_RESOURCES)
    }

    fn agent_auto_register_environments(&self) -> &str {
        self.properties.get_or_empty(AGENT_AUTO_REGISTER_ENVIRONMENTS)
    }

    fn agent_auto_register_hostname(&self) -> &str {
        self.properties.get_or_empty(AGENT_AUTO_REGISTER_HOSTNAME)
    }

    fn agent_auto_register_elastic_agent_id(&self) -> &str {
        self.properties.get_or_empty(AGENT_AUTO_REGISTER_ELASTIC_AGENT_ID)
    }

    fn agent_auto_register_elastic_plugin_id(&self) -> &str {
        self.properties.get_or_empty(AGENT_AUTO_REGISTER_ELASTIC_PLUGIN_ID)
    }

    fn scrub_registration_properties(&self) -> Result<ScrubReport> {
        scrub_file(&self.path)
    }
}

/// Display-friendly copy of the registration settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationSnapshot {
    pub key: String,
    pub resources: Vec<String>,
    pub environments: Vec<String>,
    pub hostname: String,
    pub elastic_agent_id: String,
    pub elastic_plugin_id: String,
}

/// Splits a comma-separated tag list, dropping empty entries.
pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Masks a secret so that only its length is revealed.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.chars().count() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.chars().count())
    }
}
