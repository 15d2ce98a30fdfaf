//! # Cloudflare DNS client
//!
//! Issues the single upstream call the bridge makes: a `PATCH` to
//! `https://api.cloudflare.com/client/v4/zones/:zone/dns_records/:record`
//! with body `{"content":"<address>"}`. The response is not interpreted
//! here; the bridge relays status and body verbatim to its caller.
//!
//! Deliberately absent, matching the bridge's contract:
//! - no retry or backoff (failures surface as one 502 to the caller)
//! - no caching or idempotency checks (last write wins at Cloudflare)
//! - no response parsing (relay only)
//!
//! ## Security
//!
//! The API token never appears in logs; the `Debug` implementation redacts
//! it.

use async_trait::async_trait;
use ddns_bridge_core::{Error, RecordUpdater, Result, UpstreamResponse};
use futures_util::{StreamExt, TryStreamExt};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// HTTP timeout for API requests
///
/// The inbound connection lifetime already bounds the upstream call via
/// future drop; this is a hard cap for callers that stay connected.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Cloudflare DNS API client
///
/// One shared `reqwest::Client` reused across requests. Stateless and
/// single-shot: every [`RecordUpdater::update_record`] call is exactly one
/// HTTP request.
pub struct CloudflareClient {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL (overridable for tests)
    api_base: Url,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("api_token", &"<REDACTED>")
            .field("api_base", &self.api_base.as_str())
            .finish_non_exhaustive()
    }
}

impl CloudflareClient {
    /// Create a client against the production Cloudflare API
    ///
    /// The token is expected to be validated (non-empty) by configuration
    /// loading before this is called.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_api_base(api_token, CLOUDFLARE_API_BASE)
    }

    /// Create a client against an alternative API base URL
    ///
    /// Used by tests to point the client at a local server.
    pub fn with_api_base(api_token: impl Into<String>, api_base: &str) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| Error::upstream(format!("invalid API base URL: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::upstream(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            api_token: api_token.into(),
            api_base,
            client,
        })
    }

    /// Build the record endpoint URL
    ///
    /// Zone and record identifiers are appended as path segments, which
    /// percent-encodes them; a `/` inside an identifier cannot change the
    /// request path.
    fn record_url(&self, zone: &str, record_id: &str) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::upstream("API base URL cannot be a base"))?
            .pop_if_empty()
            .extend(["zones", zone, "dns_records", record_id]);
        Ok(url)
    }
}

/// JSON payload for a record update
///
/// Built with serde_json so quotes, backslashes, and control characters in
/// the content are escaped; arbitrary input text cannot produce invalid
/// JSON.
fn update_payload(content: &str) -> serde_json::Value {
    serde_json::json!({ "content": content })
}

#[async_trait]
impl RecordUpdater for CloudflareClient {
    /// Update a DNS record's content
    ///
    /// ```http
    /// PATCH /zones/:zone_id/dns_records/:record_id
    /// Authorization: Bearer <token>
    /// Content-Type: application/json
    ///
    /// {"content":"<address>"}
    /// ```
    ///
    /// Any received response, success or not, is returned for relay. Only
    /// construction and connection failures are errors.
    async fn update_record(
        &self,
        zone: &str,
        record_id: &str,
        content: &str,
    ) -> Result<UpstreamResponse> {
        let url = self.record_url(zone, record_id)?;

        tracing::debug!(%zone, %record_id, "patching DNS record");

        let response = self
            .client
            .patch(url)
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .json(&update_payload(content))
            .send()
            .await
            .map_err(|e| Error::upstream(e.to_string()))?;

        let header_value = |name| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };

        Ok(UpstreamResponse {
            status: response.status().as_u16(),
            content_length: header_value(CONTENT_LENGTH),
            content_type: header_value(CONTENT_TYPE),
            body: response
                .bytes_stream()
                .map_err(|e| Error::upstream(e.to_string()))
                .boxed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_url_appends_segments() {
        let client = CloudflareClient::new("token").expect("client builds");
        let url = client.record_url("Z", "R").expect("url builds");
        assert_eq!(
            url.as_str(),
            "https://api.cloudflare.com/client/v4/zones/Z/dns_records/R"
        );
    }

    #[test]
    fn record_url_escapes_identifiers() {
        let client = CloudflareClient::new("token").expect("client builds");
        let url = client
            .record_url("zone/../../evil", "rec?x=1")
            .expect("url builds");
        assert_eq!(url.path(), "/client/v4/zones/zone%2F..%2F..%2Fevil/dns_records/rec%3Fx=1");
    }

    #[test]
    fn trailing_slash_in_base_does_not_double() {
        let client = CloudflareClient::with_api_base("token", "http://127.0.0.1:1/client/v4/")
            .expect("client builds");
        let url = client.record_url("Z", "R").expect("url builds");
        assert_eq!(url.path(), "/client/v4/zones/Z/dns_records/R");
    }

    #[test]
    fn payload_is_exact_shape() {
        assert_eq!(
            update_payload("1.2.3.4").to_string(),
            r#"{"content":"1.2.3.4"}"#
        );
    }

    #[test]
    fn payload_escapes_quotes_and_backslashes() {
        let payload = update_payload(r#"a"b\c"#).to_string();
        assert_eq!(payload, r#"{"content":"a\"b\\c"}"#);
        // Still valid JSON that round-trips to the original text
        let parsed: serde_json::Value = serde_json::from_str(&payload).expect("valid JSON");
        assert_eq!(parsed["content"], r#"a"b\c"#);
    }

    #[test]
    fn payload_escapes_control_characters() {
        let payload = update_payload("1.2.3.4\n\"}").to_string();
        let parsed: serde_json::Value = serde_json::from_str(&payload).expect("valid JSON");
        assert_eq!(parsed["content"], "1.2.3.4\n\"}");
    }

    #[test]
    fn debug_does_not_expose_token() {
        let client = CloudflareClient::new("secret_token_12345").expect("client builds");
        let debug_str = format!("{client:?}");
        assert!(!debug_str.contains("secret_token_12345"));
        assert!(debug_str.contains("CloudflareClient"));
    }
}
