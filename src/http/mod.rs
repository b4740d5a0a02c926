//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, dispatch handler)
//!     → middleware/ (request ID, timeout, trace, CORS decoration)
//!     → [proxy layer classifies and forwards]
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use server::EdgeServer;
