//! Local HTTPS development edge server with an OAuth pass-through proxy.
//!
//! Terminates TLS on a fixed port, serves static files from a project
//! directory, and forwards two OAuth requests to a fixed identity provider so
//! browser code can run the authorization-code/token exchange without hitting
//! cross-origin restrictions.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌─────────────────────────────────────────────────┐
//!                       │                 DEV EDGE SERVER                 │
//!                       │                                                 │
//!   Browser Request     │  ┌─────────┐    ┌──────────┐    ┌───────────┐  │
//!   ────────────────────┼─▶│   TLS   │───▶│ dispatch │───▶│ classify  │  │
//!   (https://localhost) │  │  accept │    │ handler  │    │ (method,  │  │
//!                       │  └─────────┘    └──────────┘    │   path)   │  │
//!                       │                                 └─────┬─────┘  │
//!                       │               ┌───────────────────────┤        │
//!                       │               ▼                       ▼        │
//!   Browser Response    │  ┌──────────────────┐    ┌────────────────┐   │
//!   ◀───────────────────┼──│    upstream      │    │  static file   │   │
//!     (CORS decorated)  │  │    forwarder     │    │   responder    │   │
//!                       │  └────────┬─────────┘    └────────────────┘   │
//!                       └───────────┼─────────────────────────────────────┘
//!                                   ▼
//!                     Identity provider (token / resource endpoints)
//! ```
//!
//! Every response, whatever its route or status, is decorated with the same
//! three permissive CORS headers by an outermost middleware layer.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod proxy;

pub use config::EdgeConfig;
pub use http::EdgeServer;
