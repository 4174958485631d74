// autoreg-core/src/lib.rs
//! # autoreg Core Library
//!
//! `autoreg-core` reads the auto-registration settings a build agent finds in
//! its local properties file, and scrubs those settings from the file once
//! registration has been attempted.
//!
//! ## Modules
//!
//! * `properties`: Parses line-oriented `key = value` text into a lookup table.
//! * `registration`: Defines the recognized property names, the
//!   `AgentAutoRegistrationProperties` trait and the file-backed reader.
//! * `scrub`: Comments out recognized properties in place.
//! * `errors`: The crate's error type.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use autoreg_core::{AgentAutoRegistrationProperties, AutoRegistrationPropertiesReader};
//!
//! fn main() -> Result<(), autoreg_core::AutoRegisterError> {
//!     let reader = AutoRegistrationPropertiesReader::new("config/autoregister.properties");
//!     println!("hostname override: {:?}", reader.agent_auto_register_hostname());
//!
//!     // After the registration attempt the secret must not stay on disk.
//!     let report = reader.scrub_registration_properties()?;
//!     println!("scrubbed {} lines", report.scrubbed_lines());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Lookups never fail: a missing property, or a missing file, yields empty
//! strings. Scrubbing reports I/O problems as [`AutoRegisterError`].
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod errors;
pub mod properties;
pub mod registration;
pub mod scrub;

pub use errors::AutoRegisterError;

pub use properties::{lines_with_endings, read_text, Line, Properties};

pub use registration::{
    redact_sensitive,
    split_tags,
    AgentAutoRegistrationProperties,
    AutoRegistrationPropertiesReader,
    RegistrationSnapshot,
    AGENT_AUTO_REGISTER_ELASTIC_AGENT_ID,
    AGENT_AUTO_REGISTER_ELASTIC_PLUGIN_ID,
    AGENT_AUTO_REGISTER_ENVIRONMENTS,
    AGENT_AUTO_REGISTER_HOSTNAME,
    AGENT_AUTO_REGISTER_KEY,
    AGENT_AUTO_REGISTER_RESOURCES,
    DEFAULT_PROPERTIES_PATH,
    RECOGNIZED_KEYS,
    SCRUBBED_KEYS,
};

pub use scrub::{
    preview_scrub,
    recognized_assignment,
    scrub_contents,
    scrub_file,
    ScrubReport,
    KEY_REMOVED_COMMENT,
    PROPERTY_REMOVED_COMMENT,
};
