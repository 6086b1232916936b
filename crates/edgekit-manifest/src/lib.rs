//! # Edgekit Manifest
//!
//! Package/app manifest model and fixture rewriting for the Edgekit test
//! harness.
//!
//! A fixture directory bundles a package manifest (TOML) and an app manifest
//! (YAML). This crate parses and rewrites both while preserving unrelated
//! keys, and implements the batch rename/restore operations that give every
//! fixture a fresh registry identity before a test run.

#![warn(missing_docs)]

/// Package identities (`namespace/name` pairs)
pub mod identity;

/// Package manifest (TOML) wrapper
pub mod package;

/// App manifest (YAML) wrapper
pub mod app;

/// Fixture discovery and batch rename/restore
pub mod fixture;

/// Error types for manifest operations
pub mod error;

pub use identity::PackageIdentity;
pub use package::{PackageManifest, PACKAGE_MANIFEST};
pub use app::{AppManifest, APP_MANIFEST};
pub use fixture::{FixturePair, FixtureOutcome, FixtureStatus, rename_fixtures, restore_fixtures, backup_path};
pub use error::ManifestError;
