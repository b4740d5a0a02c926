//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → EdgeConfig (validated, immutable)
//!     → shared with the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so the tool runs with no config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    EdgeConfig, ListenerConfig, StaticFilesConfig, TimeoutConfig, TlsConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
