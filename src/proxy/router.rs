//! Route classification.
//!
//! # Responsibilities
//! - Classify each inbound request by (method, path) exactly once
//! - Keep classification a pure function: deterministic, no side effects
//!
//! # Design Decisions
//! - Precedence: resource prefix, then token exact match, then GET → static
//! - The resource route is a literal prefix match, so trailing segments and
//!   query strings ride along untouched
//! - Unknown methods are rejected here, not deeper in the stack

use axum::http::Method;

/// Path prefix of the proxied resource route.
pub const RESOURCE_PREFIX: &str = "/oauth/resource";

/// Exact path of the proxied token route.
pub const TOKEN_PATH: &str = "/oauth/token";

/// Outcome of classifying one inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// POST to the token path: forward the body to the upstream token endpoint.
    TokenExchange,
    /// GET under the resource prefix: forward Authorization to the upstream
    /// resource endpoint.
    ResourceFetch,
    /// Any other GET: serve from the document root.
    StaticAsset,
    /// Everything else: 404 with an empty body.
    Unmatched,
}

/// Classify a request by method and path.
pub fn classify(method: &Method, path: &str) -> RouteClass {
    if method == Method::GET && path.starts_with(RESOURCE_PREFIX) {
        RouteClass::ResourceFetch
    } else if method == Method::POST && path == TOKEN_PATH {
        RouteClass::TokenExchange
    } else if method == Method::GET {
        RouteClass::StaticAsset
    } else {
        RouteClass::Unmatched
    }
}
