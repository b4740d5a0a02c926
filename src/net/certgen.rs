//! Development certificate acquisition.
//!
//! # Responsibilities
//! - Ensure the configured certificate files exist before TLS startup
//! - Generate a self-signed localhost certificate when they do not
//!
//! # Design Decisions
//! - Acquisition is a strategy list tried in order: existing files, the
//!   openssl CLI, in-process generation with rcgen
//! - The error names every strategy that failed, so a machine without
//!   openssl still gets a usable diagnostic
//! - Only the separate cert/key layout is generated; a combined PEM must
//!   already exist on disk

use std::path::Path;
use std::process::Command;
use thiserror::Error;

use crate::config::TlsConfig;

/// Error type for certificate acquisition.
#[derive(Debug, Error)]
pub enum CertError {
    #[error("certificate files missing and auto_generate is disabled: {0}")]
    Missing(String),

    #[error("combined certificate PEM must already exist, cannot generate: {0}")]
    CombinedLayout(String),

    #[error("all certificate strategies failed: {0}")]
    AllStrategiesFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Generation strategies, tried in order.
const STRATEGIES: &[(&str, fn(&Path, &Path) -> Result<(), String>)] = &[
    ("openssl-cli", openssl_cli),
    ("rcgen", rcgen_self_signed),
];

/// Ensure the configured certificate files exist, generating them if allowed.
pub fn ensure_certificate(tls: &TlsConfig) -> Result<(), CertError> {
    let cert = Path::new(&tls.cert_path);
    let key = tls.key_path.as_deref().map(Path::new);

    let all_present = cert.exists() && key.map_or(true, |k| k.exists());
    if all_present {
        tracing::debug!(cert = %cert.display(), "Using existing certificate files");
        return Ok(());
    }

    if !tls.auto_generate {
        return Err(CertError::Missing(tls.cert_path.clone()));
    }
    let Some(key) = key else {
        return Err(CertError::CombinedLayout(tls.cert_path.clone()));
    };

    for parent in [cert.parent(), key.parent()].into_iter().flatten() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut failures = Vec::new();
    for (name, strategy) in STRATEGIES {
        match strategy(cert, key) {
            Ok(()) => {
                tracing::info!(
                    strategy = name,
                    cert = %cert.display(),
                    key = %key.display(),
                    "Generated self-signed certificate"
                );
                return Ok(());
            }
            Err(reason) => {
                tracing::debug!(strategy = name, reason = %reason, "Certificate strategy failed");
                failures.push(format!("{name}: {reason}"));
            }
        }
    }

    Err(CertError::AllStrategiesFailed(failures.join("; ")))
}

/// Shell out to the openssl CLI, the same command a developer would run by
/// hand.
fn openssl_cli(cert: &Path, key: &Path) -> Result<(), String> {
    let output = Command::new("openssl")
        .args([
            "req", "-x509", "-newkey", "rsa:4096", "-days", "365", "-nodes", "-subj",
            "/CN=localhost",
        ])
        .arg("-keyout")
        .arg(key)
        .arg("-out")
        .arg(cert)
        .output()
        .map_err(|e| e.to_string())?;

    if output.status.success() {
        Ok(())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}

/// Generate in-process with rcgen: self-signed, SAN localhost, one year.
fn rcgen_self_signed(cert: &Path, key: &Path) -> Result<(), String> {
    let key_pair = rcgen::KeyPair::generate().map_err(|e| e.to_string())?;

    let mut params =
        rcgen::CertificateParams::new(vec!["localhost".to_string()]).map_err(|e| e.to_string())?;
    params
        .distinguished_name
        .push(rcgen::DnType::CommonName, "localhost");
    let now = time::OffsetDateTime::now_utc();
    params.not_before = now - time::Duration::minutes(1);
    params.not_after = now + time::Duration::days(365);

    let certificate = params.self_signed(&key_pair).map_err(|e| e.to_string())?;

    std::fs::write(cert, certificate.pem()).map_err(|e| e.to_string())?;
    std::fs::write(key, key_pair.serialize_pem()).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_paths(label: &str) -> (PathBuf, PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "edge-certgen-{label}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        (dir.clone(), dir.join("localhost.pem"), dir.join("localhost-key.pem"))
    }

    #[test]
    fn test_existing_files_left_untouched() {
        let (dir, cert, key) = temp_paths("existing");
        std::fs::write(&cert, "existing cert").unwrap();
        std::fs::write(&key, "existing key").unwrap();

        let tls = TlsConfig {
            cert_path: cert.display().to_string(),
            key_path: Some(key.display().to_string()),
            ..TlsConfig::default()
        };
        ensure_certificate(&tls).unwrap();

        assert_eq!(std::fs::read_to_string(&cert).unwrap(), "existing cert");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_files_without_auto_generate() {
        let tls = TlsConfig {
            cert_path: "nope/cert.pem".to_string(),
            key_path: Some("nope/key.pem".to_string()),
            auto_generate: false,
            ..TlsConfig::default()
        };
        let err = ensure_certificate(&tls).unwrap_err();
        assert!(matches!(err, CertError::Missing(_)));
    }

    #[test]
    fn test_combined_layout_never_generated() {
        let tls = TlsConfig {
            cert_path: "nope/combined.pem".to_string(),
            key_path: None,
            ..TlsConfig::default()
        };
        let err = ensure_certificate(&tls).unwrap_err();
        assert!(matches!(err, CertError::CombinedLayout(_)));
    }

    #[test]
    fn test_rcgen_strategy_writes_pem_pair() {
        let (dir, cert, key) = temp_paths("rcgen");
        rcgen_self_signed(&cert, &key).unwrap();

        let cert_pem = std::fs::read_to_string(&cert).unwrap();
        let key_pem = std::fs::read_to_string(&key).unwrap();
        assert!(cert_pem.contains("BEGIN CERTIFICATE"));
        assert!(key_pem.contains("BEGIN PRIVATE KEY"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
