//! # ddns-bridge-core
//!
//! Core library for the MikroTik-to-Cloudflare DDNS bridge.
//!
//! The bridge accepts a client-reported IP address over HTTP and forwards a
//! record update to the DNS provider's API. This crate holds everything the
//! transport and provider crates share:
//!
//! - **BridgeConfig**: the TOML configuration file, with defaulting and
//!   required-field validation
//! - **UpdateRequest** / **AddressFamily**: classification of an inbound
//!   request body into IPv4 or IPv6
//! - **RecordUpdater**: trait for issuing one record update against the
//!   provider API and handing back the raw response for relay
//! - **Error**: the error taxonomy shared across the workspace

pub mod config;
pub mod error;
pub mod traits;
pub mod update;

// Re-export core types for convenience
pub use config::BridgeConfig;
pub use error::{Error, Result};
pub use traits::{BodyStream, RecordUpdater, UpstreamResponse};
pub use update::{AddressFamily, UpdateRequest};
