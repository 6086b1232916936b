//! Error types for manifest operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Manifest-specific errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// A required manifest file does not exist
    #[error("missing manifest file: {0}")]
    Missing(PathBuf),

    /// A required field is absent or has the wrong shape
    #[error("invalid manifest: {0}")]
    Invalid(String),

    /// An identity token failed validation
    #[error("invalid identity: {0}")]
    Identity(String),

    /// TOML parse or serialize error
    #[error("TOML error: {0}")]
    Toml(String),

    /// YAML parse or serialize error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<toml::de::Error> for ManifestError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ManifestError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Toml(err.to_string())
    }
}
