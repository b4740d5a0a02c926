//! Request ID middleware.
//!
//! # Responsibilities
//! - Attach an x-request-id header to every inbound request
//! - Echo the ID on the response for client-side correlation
//!
//! # Design Decisions
//! - IDs are UUID v4, generated as early as possible for tracing
//! - A client-supplied ID is kept, not replaced

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Ensure the request carries an ID and echo it on the response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = match request.headers().get(X_REQUEST_ID) {
        Some(existing) => existing.clone(),
        None => HeaderValue::from_str(&Uuid::new_v4().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
    };

    request.headers_mut().insert(X_REQUEST_ID, id.clone());
    let mut response = next.run(request).await;
    response.headers_mut().insert(X_REQUEST_ID, id);

    response
}
