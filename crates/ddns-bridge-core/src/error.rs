//! Error types for the DDNS bridge
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS bridge
///
/// Configuration variants (`Io`, `Parse`, `UnknownField`, `MissingField`)
/// are fatal at startup; the daemon maps them to a non-zero exit code.
/// `Upstream` is per-request and maps to a 502 response.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be read
    #[error("cannot read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML
    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration file contains a key outside the recognized set
    #[error("unknown option {0:?}")]
    UnknownField(String),

    /// A required configuration field is empty
    #[error("{0} is empty")]
    MissingField(&'static str),

    /// Upstream request could not be constructed or the connection failed
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl Error {
    /// Create an unknown-field configuration error
    pub fn unknown_field(key: impl Into<String>) -> Self {
        Self::UnknownField(key.into())
    }

    /// Create a missing-field configuration error
    pub fn missing_field(key: &'static str) -> Self {
        Self::MissingField(key)
    }

    /// Create an upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }
}
