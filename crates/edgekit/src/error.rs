//! Error types for harness operations

use edgekit_cli::CliError;
use edgekit_manifest::ManifestError;
use edgekit_registry::RegistryError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for harness operations
#[derive(Debug, Error)]
pub enum EdgekitError {
    /// A required manifest file is absent
    #[error("missing manifest: {0}")]
    MissingManifest(PathBuf),

    /// A manifest is present but unusable
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// An external CLI invocation failed
    #[error("subprocess failure: {0}")]
    Subprocess(#[from] CliError),

    /// The registry query failed
    #[error("registry query failed: {0}")]
    Registry(#[from] RegistryError),

    /// The readiness probe budget was exhausted
    #[error("app {hostname} not ready after {attempts} attempts")]
    ReadinessTimeout {
        /// Hostname that never answered 200
        hostname: String,
        /// Number of probes issued
        attempts: u32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ManifestError> for EdgekitError {
    fn from(err: ManifestError) -> Self {
        match err {
            ManifestError::Missing(path) => Self::MissingManifest(path),
            ManifestError::Io(err) => Self::Io(err),
            other => Self::InvalidManifest(other.to_string()),
        }
    }
}
