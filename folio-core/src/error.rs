//! Error types shared across the core crate.
//!
//! Page-level code treats a missing element as "feature absent" and never
//! produces an error. These variants cover the inputs that do get parsed:
//! translation tables, configuration files, and stored preferences.

use thiserror::Error;

/// Errors from parsing or validating page inputs.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("unknown language code '{0}'")]
    UnknownLanguage(String),

    #[error("parse translation table: {0}")]
    Translations(#[from] serde_json::Error),

    #[error("parse config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("preference store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("script line {line}: {reason}")]
    Script { line: usize, reason: String },
}
