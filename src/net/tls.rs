//! TLS configuration and certificate loading.
//!
//! One configuration covers both certificate layouts the tool accepts: a
//! combined cert+key PEM (`key_path` absent) or separate certificate and key
//! files.

use axum_server::tls_rustls::RustlsConfig;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

use crate::config::TlsConfig;

/// Error type for TLS context construction.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("certificate file not found: {0}")]
    CertNotFound(String),

    #[error("private key file not found: {0}")]
    KeyNotFound(String),

    #[error("no certificate found in {0}")]
    NoCertificate(String),

    #[error("no private key found in {0}")]
    NoPrivateKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Build a rustls server context from the configured certificate layout.
pub async fn load_tls_config(tls: &TlsConfig) -> Result<RustlsConfig, TlsError> {
    let cert_path = Path::new(&tls.cert_path);
    if !cert_path.exists() {
        return Err(TlsError::CertNotFound(tls.cert_path.clone()));
    }

    match &tls.key_path {
        Some(key) => {
            let key_path = Path::new(key);
            if !key_path.exists() {
                return Err(TlsError::KeyNotFound(key.clone()));
            }
            Ok(RustlsConfig::from_pem_file(cert_path, key_path).await?)
        }
        None => from_combined_pem(cert_path).await,
    }
}

/// Parse a single PEM file holding both the certificate chain and the
/// private key.
async fn from_combined_pem(path: &Path) -> Result<RustlsConfig, TlsError> {
    let pem = tokio::fs::read(path).await?;

    let mut reader = Cursor::new(&pem);
    let certs: Vec<Vec<u8>> = rustls_pemfile::certs(&mut reader)
        .map(|cert| cert.map(|der| der.as_ref().to_vec()))
        .collect::<Result<_, _>>()?;
    if certs.is_empty() {
        return Err(TlsError::NoCertificate(path.display().to_string()));
    }

    let mut reader = Cursor::new(&pem);
    let key = rustls_pemfile::private_key(&mut reader)?
        .ok_or_else(|| TlsError::NoPrivateKey(path.display().to_string()))?;

    Ok(RustlsConfig::from_der(certs, key.secret_der().to_vec()).await?)
}
