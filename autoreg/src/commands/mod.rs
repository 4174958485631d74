//! Command implementations for the `autoreg` CLI.

pub mod scrub;
pub mod show;
