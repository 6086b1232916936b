//! # Edgekit Registry
//!
//! HTTP side of the harness: a thin GraphQL client for the platform registry
//! (token auth, latest-version lookup) and the readiness probe that polls a
//! deployed app's hostname through the edge entrypoint.

#![warn(missing_docs)]

/// GraphQL registry client
pub mod client;

/// Edge readiness probing
pub mod probe;

/// Error types for registry operations
pub mod error;

pub use client::{RegistryClient, VersionLookup};
pub use probe::{EdgeProbe, ReadinessProbe, RetryPolicy, wait_until_ready};
pub use error::RegistryError;
