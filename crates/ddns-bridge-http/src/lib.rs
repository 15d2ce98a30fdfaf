//! # HTTP update endpoint
//!
//! The inbound surface of the bridge: one route, registered at the
//! configured path, that validates an update request and proxies it to the
//! DNS provider through [`RecordUpdater`].
//!
//! Per-request flow, linear with no branching back:
//!
//! 1. method check (`405` for anything but POST, empty body)
//! 2. body read (`500` on failure)
//! 3. family classification (colon rule) and capability check (`400` when
//!    the family's record is not configured)
//! 4. one upstream call; a connection failure is `502`, a received response
//!    is relayed verbatim (status, body, and the `Content-Length` /
//!    `Content-Type` headers when present)
//!
//! Every response carries a fixed `Server` header. Requests are fully
//! independent; the only shared state is the read-only configuration.
//! Caller disconnection cancels the upstream call because hyper drops the
//! handler future, taking the in-flight request future with it.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use ddns_bridge_core::{BridgeConfig, RecordUpdater, UpdateRequest, UpstreamResponse};

/// Value of the `Server` header on every response
pub const SERVER_IDENT: &str =
    "mikrotik-cf-ddns/1.0 (+https://github.com/GreenYun/mikrotik-cf-ddns)";

/// Request body cap; an address literal is a few dozen bytes at most
const MAX_BODY_BYTES: usize = 64 * 1024;

/// State injected into the update handler
#[derive(Clone)]
pub struct AppState {
    config: Arc<BridgeConfig>,
    updater: Arc<dyn RecordUpdater>,
}

/// Build the application router
///
/// The update handler is registered with `any()` and does its own method
/// check so non-POST requests get an empty-body 405 rather than a
/// framework default. Paths other than the configured one fall through to
/// the 404 fallback.
pub fn router(config: Arc<BridgeConfig>, updater: Arc<dyn RecordUpdater>) -> Router {
    let path = config.http_path.clone();
    let state = AppState { config, updater };

    Router::new()
        .route(&path, any(update_handler))
        .with_state(state)
        // Access log at info so it shows under the daemon's default filter
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::SERVER,
            HeaderValue::from_static(SERVER_IDENT),
        ))
}

async fn update_handler(State(state): State<AppState>, request: Request) -> Response {
    if request.method() != Method::POST {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let body = match axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "failed to read request body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let update = UpdateRequest::from_body(&String::from_utf8_lossy(&body));

    let Some(record_id) = update.family.record_id(&state.config) else {
        let message = update.family.unsupported_message();
        tracing::warn!("{message}");
        return (StatusCode::BAD_REQUEST, message).into_response();
    };

    match state
        .updater
        .update_record(&state.config.zone, record_id, &update.content)
        .await
    {
        Ok(upstream) => relay(upstream),
        Err(err) => {
            tracing::error!(error = %err, "cannot connect to upstream server");
            (StatusCode::BAD_GATEWAY, "cannot connect to upstream server").into_response()
        }
    }
}

/// Relay an upstream response to the caller
///
/// Status verbatim, body streamed verbatim, and only the two headers the
/// bridge copies through.
fn relay(upstream: UpstreamResponse) -> Response {
    let mut builder = Response::builder().status(upstream.status);
    if let Some(length) = upstream.content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }
    if let Some(content_type) = upstream.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    match builder.body(Body::from_stream(upstream.body)) {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "upstream response could not be relayed");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
