//! errors.rs - Custom error types for the autoreg-core library.
//!
//! Every fallible file operation in this crate reports through
//! [`AutoRegisterError`], carrying the path it was working on.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// All error types produced by the `autoreg-core` library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AutoRegisterError {
    #[error("Failed to read properties file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write properties file {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Properties file {} is not valid UTF-8", .path.display())]
    NotUtf8 { path: PathBuf },
}

impl AutoRegisterError {
    /// Returns true when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        match self {
            AutoRegisterError::Read { source, .. } | AutoRegisterError::Write { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            AutoRegisterError::NotUtf8 { .. } => false,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AutoRegisterError>;
