//! # Edgekit
//!
//! End-to-end test harness for a cloud application deployment platform
//! (registry + edge proxy + CLI).
//!
//! The platform itself is an opaque external collaborator reached through its
//! CLI and a GraphQL endpoint. Edgekit provides the glue the test suite
//! needs: environment configuration, an idempotent publish-and-deploy
//! workflow that turns a fixture directory into a reachable hostname, and a
//! fixed-budget readiness poller for freshly deployed apps.

#![warn(missing_docs)]

pub use edgekit_cli as cli;
pub use edgekit_manifest as manifest;
pub use edgekit_registry as registry;

/// Error types for harness operations
pub mod error;

/// Environment-variable configuration
pub mod config;

/// The deploy-and-wait workflow
pub mod workflow;

pub use config::EnvConfig;
pub use error::EdgekitError;
pub use registry::RetryPolicy;
pub use workflow::{DeployedApp, Deployer};

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, EdgekitError>;
