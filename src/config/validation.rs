//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the bind address and upstream URLs before the server starts
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: EdgeConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::EdgeConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{address}': {reason}")]
    BindAddress { address: String, reason: String },

    #[error("invalid upstream {endpoint} URL '{url}': {reason}")]
    UpstreamUrl {
        endpoint: &'static str,
        url: String,
        reason: String,
    },

    #[error("upstream {endpoint} URL must use http or https: '{url}'")]
    UpstreamScheme { endpoint: &'static str, url: String },

    #[error("tls.cert_path must not be empty when TLS is enabled")]
    EmptyCertPath,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::BindAddress {
            address: config.listener.bind_address.clone(),
            reason: e.to_string(),
        });
    }

    for (endpoint, value) in [
        ("token", &config.upstream.token_url),
        ("resource", &config.upstream.resource_url),
    ] {
        match Url::parse(value) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(_) => errors.push(ValidationError::UpstreamScheme {
                endpoint,
                url: value.clone(),
            }),
            Err(e) => errors.push(ValidationError::UpstreamUrl {
                endpoint,
                url: value.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.tls.enabled && config.tls.cert_path.is_empty() {
        errors.push(ValidationError::EmptyCertPath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
