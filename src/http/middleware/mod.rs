//! Cross-cutting request/response middleware.

pub mod cors;
pub mod request_id;

pub use cors::cross_origin_headers;
pub use request_id::{request_id, X_REQUEST_ID};
