//! Package manifest (TOML) wrapper

use crate::{ManifestError, PackageIdentity};
use std::fs;
use std::path::Path;
use toml::Value;

/// File name of the package manifest inside a fixture directory
pub const PACKAGE_MANIFEST: &str = "package.toml";

/// A package manifest parsed into a TOML value tree.
///
/// The manifest is edited as a value tree rather than a rigid struct so that
/// rewrites preserve every key the harness does not care about (modules,
/// commands, filesystem mappings and so on).
#[derive(Debug, Clone)]
pub struct PackageManifest {
    doc: Value,
}

impl PackageManifest {
    /// Load a package manifest from disk.
    ///
    /// A missing file maps to [`ManifestError::Missing`].
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ManifestError::Missing(path.to_path_buf())
            } else {
                ManifestError::Io(err)
            }
        })?;
        Self::parse(&raw)
    }

    /// Parse a package manifest from a TOML string
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let doc: Value = raw.parse()?;
        Ok(Self { doc })
    }

    /// The declared `package.name` (`namespace/name`)
    pub fn name(&self) -> Result<&str, ManifestError> {
        self.package_field("name")
    }

    /// The declared `package.version` (a semver string)
    pub fn version(&self) -> Result<&str, ManifestError> {
        self.package_field("version")
    }

    /// The declared package identity parsed from `package.name`
    pub fn identity(&self) -> Result<PackageIdentity, ManifestError> {
        PackageIdentity::parse(self.name()?)
    }

    /// Set `package.name` to the given identity's full name
    pub fn set_name(&mut self, identity: &PackageIdentity) -> Result<(), ManifestError> {
        let table = self
            .doc
            .get_mut("package")
            .and_then(Value::as_table_mut)
            .ok_or_else(|| ManifestError::Invalid("missing [package] table".to_string()))?;
        table.insert("name".to_string(), Value::String(identity.full_name()));
        Ok(())
    }

    /// Serialize the manifest back to a TOML string
    pub fn to_toml(&self) -> Result<String, ManifestError> {
        Ok(toml::to_string(&self.doc)?)
    }

    /// Write the manifest back to disk
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    fn package_field(&self, field: &str) -> Result<&str, ManifestError> {
        self.doc
            .get("package")
            .and_then(|pkg| pkg.get(field))
            .and_then(Value::as_str)
            .ok_or_else(|| ManifestError::Invalid(format!("missing package.{}", field)))
    }
}
