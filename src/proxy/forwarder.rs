//! Upstream forwarding for the two proxied OAuth routes.
//!
//! # Responsibilities
//! - Perform exactly one outbound call per proxied request
//! - Relay upstream status and body verbatim, on success and on HTTP error
//! - Synthesize a stable JSON error on transport-level failure
//!
//! # Design Decisions
//! - Forwarded headers are a fixed allowlist (Authorization for resource
//!   fetches, Content-Type for token exchanges), never the full inbound set
//! - Upstream bodies are relayed as raw bytes, never parsed or re-encoded;
//!   the browser client implements OAuth itself and depends on seeing the
//!   provider's exact error shape (e.g. `invalid_grant`)
//! - Upstream calls carry a bounded timeout; the original tool applied none

use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::config::{TimeoutConfig, UpstreamConfig};

/// Body sent when a resource fetch arrives without an Authorization header.
pub const MISSING_AUTHORIZATION_BODY: &str = r#"{"error": "missing_authorization"}"#;

/// Client-side relay failures. These never reach the upstream.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Resource fetch without an Authorization header.
    #[error("missing Authorization header")]
    MissingAuthorization,

    /// Inbound body could not be read in full (truncated or oversized).
    #[error("failed to read request body: {0}")]
    BodyRead(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::MissingAuthorization => json_response(
                StatusCode::UNAUTHORIZED,
                Bytes::from_static(MISSING_AUTHORIZATION_BODY.as_bytes()),
            ),
            RelayError::BodyRead(reason) => json_response(
                StatusCode::BAD_REQUEST,
                error_body("invalid_request", &reason),
            ),
        }
    }
}

/// Forwards proxied requests to the identity provider and relays the outcome
/// without reinterpreting it.
pub struct UpstreamForwarder {
    client: reqwest::Client,
    token_url: String,
    resource_url: String,
}

impl UpstreamForwarder {
    /// Build the forwarder with a bounded upstream client.
    pub fn new(
        upstream: &UpstreamConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()?;

        Ok(Self {
            client,
            token_url: upstream.token_url.clone(),
            resource_url: upstream.resource_url.clone(),
        })
    }

    /// Forward a resource fetch, carrying only the inbound Authorization
    /// header.
    pub async fn resource_fetch(&self, authorization: &HeaderValue) -> Response {
        let result = self
            .client
            .get(&self.resource_url)
            .header(reqwest::header::AUTHORIZATION, authorization.as_bytes())
            .send()
            .await;

        relay("resource", result).await
    }

    /// Forward a token exchange with the inbound body verbatim. The client's
    /// credentials are form-encoded inside the body and must not be altered.
    pub async fn token_exchange(&self, body: Bytes) -> Response {
        let result = self
            .client
            .post(&self.token_url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await;

        relay("token", result).await
    }
}

/// Relay an upstream outcome per the pass-through contract: verbatim body on
/// success and on upstream HTTP error, synthesized 500 on transport failure.
async fn relay(route: &'static str, result: Result<reqwest::Response, reqwest::Error>) -> Response {
    let upstream = match result {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::warn!(route, error = %e, "Upstream request failed");
            return transport_error(&e);
        }
    };

    let status = upstream.status();
    let body = match upstream.bytes().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(route, error = %e, "Upstream body read failed");
            return transport_error(&e);
        }
    };

    // Success statuses normalize to 200; error codes relay exactly.
    let relayed = if status.is_success() {
        StatusCode::OK
    } else {
        StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
    };

    tracing::debug!(
        route,
        upstream_status = status.as_u16(),
        bytes = body.len(),
        "Relaying upstream response"
    );
    json_response(relayed, body)
}

/// Synthesized response for transport-level failures: refused connection,
/// timeout, DNS failure, or a response whose body could not be read.
fn transport_error(err: &reqwest::Error) -> Response {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_body("proxy_error", &err.to_string()),
    )
}

fn error_body(code: &str, message: &str) -> Bytes {
    Bytes::from(json!({ "error": code, "message": message }).to_string())
}

fn json_response(status: StatusCode, body: Bytes) -> Response {
    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response()
}
