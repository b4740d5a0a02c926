//! Proxy subsystem: route classification and upstream forwarding.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, headers, body)
//!     → router.rs (classify into one of four route classes)
//!     → forwarder.rs (one outbound call for the two proxied classes)
//!     → Relay: status + body verbatim, or synthesized JSON error
//! ```
//!
//! # Design Decisions
//! - Classification is a pure function of (method, path); no route matches twice
//! - The forwarder never masks, reinterprets, or swallows upstream semantics
//! - No cross-request state: every artifact lives and dies with one request

pub mod forwarder;
pub mod router;

pub use forwarder::{RelayError, UpstreamForwarder, MISSING_AUTHORIZATION_BODY};
pub use router::{classify, RouteClass, RESOURCE_PREFIX, TOKEN_PATH};
