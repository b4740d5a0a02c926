//! Network edge subsystem: TLS context loading and dev certificates.
//!
//! # Data Flow
//! ```text
//! startup
//!     → certgen.rs (ensure cert/key files exist, generating if allowed)
//!     → tls.rs (load files into a rustls server context)
//!     → axum-server terminates TLS on the listener
//! ```

pub mod certgen;
pub mod tls;

pub use certgen::{ensure_certificate, CertError};
pub use tls::{load_tls_config, TlsError};
