//! Provider trait for record updates
//!
//! The HTTP layer talks to the DNS provider through [`RecordUpdater`] so it
//! can be tested with a mock. The provider returns the raw upstream
//! response rather than an interpreted result: the bridge relays status and
//! body verbatim to the caller and never inspects them.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;

use crate::error::Result;

/// Streamed upstream response body
pub type BodyStream = BoxStream<'static, Result<Bytes>>;

/// The parts of an upstream response the bridge relays
///
/// Only `Content-Length` and `Content-Type` are copied through; all other
/// upstream headers are dropped. The body is a stream so large responses
/// are never buffered in the bridge.
pub struct UpstreamResponse {
    /// Upstream status code, relayed verbatim
    pub status: u16,
    /// Upstream `Content-Length` header, if present
    pub content_length: Option<String>,
    /// Upstream `Content-Type` header, if present
    pub content_type: Option<String>,
    /// Upstream response body
    pub body: BodyStream,
}

impl std::fmt::Debug for UpstreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// A DNS provider that can push one record update
///
/// Implementations make exactly one API call per invocation: no retries, no
/// caching, no background tasks. Cancellation is propagated by dropping the
/// returned future, so an implementation must not detach work from it.
#[async_trait]
pub trait RecordUpdater: Send + Sync {
    /// Set the content of `record_id` in `zone` to `content`
    ///
    /// Returns the provider's response for verbatim relay, or an error if
    /// the request could not be constructed or the connection failed.
    async fn update_record(
        &self,
        zone: &str,
        record_id: &str,
        content: &str,
    ) -> Result<UpstreamResponse>;
}
