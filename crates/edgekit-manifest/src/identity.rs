//! Package identities (`namespace/name` pairs)

use crate::ManifestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix applied to randomly generated fixture names
pub const RANDOM_NAME_PREFIX: &str = "test-";

/// A globally unique package identity at registry scope.
///
/// Both segments are non-empty, URL/path-safe tokens. The pair is assigned
/// once per fixture and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageIdentity {
    /// Owning namespace (usually the authenticated user)
    pub namespace: String,
    /// Package name within the namespace
    pub name: String,
}

impl PackageIdentity {
    /// Create an identity, validating both segments
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, ManifestError> {
        let namespace = namespace.into();
        let name = name.into();
        if !is_safe_token(&namespace) {
            return Err(ManifestError::Identity(format!(
                "namespace is not a URL-safe token: {:?}",
                namespace
            )));
        }
        if !is_safe_token(&name) {
            return Err(ManifestError::Identity(format!(
                "name is not a URL-safe token: {:?}",
                name
            )));
        }
        Ok(Self { namespace, name })
    }

    /// Create an identity with a random `test-` prefixed name
    pub fn random(namespace: impl Into<String>) -> Result<Self, ManifestError> {
        Self::new(namespace, random_name())
    }

    /// Parse a `namespace/name` reference
    pub fn parse(full: &str) -> Result<Self, ManifestError> {
        let mut parts = full.splitn(2, '/');
        let namespace = parts.next().unwrap_or_default();
        let name = parts
            .next()
            .ok_or_else(|| ManifestError::Identity(format!("expected 'namespace/name', got {:?}", full)))?;
        if name.contains('/') {
            return Err(ManifestError::Identity(format!(
                "expected 'namespace/name', got {:?}",
                full
            )));
        }
        Self::new(namespace, name)
    }

    /// The full `namespace/name` package reference
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    /// The app name derived from this identity (the bare package name)
    pub fn app_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Generate a random fixture name from the first two groups of a v4 UUID
fn random_name() -> String {
    let id = Uuid::new_v4().to_string();
    let mut groups = id.split('-');
    let a = groups.next().unwrap_or_default();
    let b = groups.next().unwrap_or_default();
    format!("{}{}-{}", RANDOM_NAME_PREFIX, a, b)
}

/// Check that a token is non-empty and URL/path-safe
fn is_safe_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
