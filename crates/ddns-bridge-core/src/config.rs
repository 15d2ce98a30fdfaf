//! Configuration for the DDNS bridge
//!
//! The bridge reads one TOML file at startup. Every key is optional in the
//! file; `token` and `zone` must be non-empty after defaulting, and any key
//! outside the recognized set is a fatal startup error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default listen address when `http_addr` is absent or empty
pub const DEFAULT_HTTP_ADDR: &str = ":28275";

/// Default listen path when `http_path` is absent or empty
pub const DEFAULT_HTTP_PATH: &str = "/update";

/// The set of keys the configuration file may contain
const RECOGNIZED_KEYS: [&str; 6] = [
    "http_addr",
    "http_path",
    "token",
    "zone",
    "record_a",
    "record_aaaa",
];

/// Bridge configuration
///
/// Constructed once at startup and shared read-only with the update
/// handler for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Listen address (host:port)
    #[serde(default)]
    pub http_addr: String,

    /// Listen path for the update endpoint
    #[serde(default)]
    pub http_path: String,

    /// Cloudflare API token with DNS edit permissions
    /// ⚠️ NEVER log this value
    #[serde(default)]
    pub token: String,

    /// Cloudflare zone identifier
    #[serde(default)]
    pub zone: String,

    /// Record identifier for the A record (empty disables IPv4)
    #[serde(default)]
    pub record_a: String,

    /// Record identifier for the AAAA record (empty disables IPv6)
    #[serde(default)]
    pub record_aaaa: String,
}

impl BridgeConfig {
    /// Load and validate the configuration file at `path`
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the file is missing or unreadable
    /// - [`Error::Parse`] if the file is not valid TOML
    /// - [`Error::UnknownField`] if the file contains an unrecognized key
    /// - [`Error::MissingField`] if `token` or `zone` is empty
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Parse, default, and validate a configuration document
    pub fn from_toml(raw: &str) -> Result<Self> {
        let table: toml::Table = raw.parse()?;

        // Reject unknown keys before typed deserialization so the caller
        // sees which option is wrong rather than a generic parse error.
        for key in table.keys() {
            if !RECOGNIZED_KEYS.contains(&key.as_str()) {
                return Err(Error::unknown_field(key));
            }
        }

        let mut config: BridgeConfig = table.try_into()?;
        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    fn apply_defaults(&mut self) {
        if self.http_addr.is_empty() {
            self.http_addr = DEFAULT_HTTP_ADDR.to_string();
        }
        if self.http_path.is_empty() {
            self.http_path = DEFAULT_HTTP_PATH.to_string();
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::missing_field("token"));
        }
        if self.zone.is_empty() {
            return Err(Error::missing_field("zone"));
        }
        Ok(())
    }
}
