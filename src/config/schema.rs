//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge
//! server. All types derive Serde traits for deserialization from config
//! files, and every section has defaults so the binary runs with no config
//! file at all.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the edge server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// TLS termination settings.
    pub tls: TlsConfig,

    /// Upstream identity-provider endpoints.
    pub upstream: UpstreamConfig,

    /// Static file serving settings.
    pub static_files: StaticFilesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8443").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8443".to_string(),
        }
    }
}

/// TLS configuration for the listener.
///
/// `key_path` may be omitted, in which case `cert_path` must point to a
/// combined PEM holding both the certificate chain and the private key.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Terminate TLS on the listener. Plain HTTP when false.
    pub enabled: bool,

    /// Path to the certificate file (PEM).
    pub cert_path: String,

    /// Path to the private key file (PEM). Absent = combined cert+key PEM.
    pub key_path: Option<String>,

    /// Generate a self-signed localhost certificate when the files are
    /// missing. Only applies to the separate cert/key layout.
    pub auto_generate: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cert_path: "dev/localhost.pem".to_string(),
            key_path: Some("dev/localhost-key.pem".to_string()),
            auto_generate: true,
        }
    }
}

/// Upstream identity-provider endpoints.
///
/// Fixed for the lifetime of the process; never derived from request data.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Token-exchange endpoint (POST target).
    pub token_url: String,

    /// Resource endpoint (GET target).
    pub resource_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            token_url: "https://www.onlinescoutmanager.co.uk/oauth/token".to_string(),
            resource_url: "https://www.onlinescoutmanager.co.uk/oauth/resource".to_string(),
        }
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Document root for static assets.
    pub root: PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// Timeout configuration.
///
/// The upstream call and the inbound body read are the only operations that
/// can suspend a request; both are bounded by these values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time budget for one inbound request in seconds.
    pub request_secs: u64,

    /// Upstream call timeout in seconds.
    pub upstream_secs: u64,

    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 30,
            connect_secs: 10,
        }
    }
}
