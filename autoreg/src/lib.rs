// autoreg/src/lib.rs
//! # autoreg CLI Application
//!
//! Operator-facing commands for inspecting and scrubbing a build agent's
//! auto-registration properties file.

pub mod cli;
pub mod commands;
pub mod logger;
