//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::EdgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<EdgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EdgeConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_invalid_config_reports_all_problems() {
        let dir = std::env::temp_dir().join(format!("edge-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        fs::write(
            &path,
            r#"
            [listener]
            bind_address = "nope"

            [upstream]
            token_url = "ftp://x/token"
            "#,
        )
        .unwrap();

        let err = load_config(&path).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
        fs::remove_dir_all(&dir).ok();
    }
}
