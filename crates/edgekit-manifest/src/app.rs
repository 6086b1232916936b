//! App manifest (YAML) wrapper

use crate::{ManifestError, PackageIdentity};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// File name of the app manifest inside a fixture directory
pub const APP_MANIFEST: &str = "app.yaml";

/// Key holding a previously assigned application identifier
pub const APP_ID_KEY: &str = "app_id";

/// An app manifest parsed into a YAML mapping.
///
/// Like [`crate::PackageManifest`], edits go through the raw mapping so that
/// keys the harness does not know about (kind, domains, capabilities) are
/// preserved on rewrite.
#[derive(Debug, Clone)]
pub struct AppManifest {
    doc: Mapping,
}

impl AppManifest {
    /// Load an app manifest from disk.
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

    /// Parse an app manifest from a YAML string
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let doc: Value = serde_yaml::from_str(raw)?;
        match doc {
            Value::Mapping(doc) => Ok(Self { doc }),
            other => Err(ManifestError::Invalid(format!(
                "app manifest must be a mapping, got {:?}",
                other
            ))),
        }
    }

    /// The declared app name
    pub fn name(&self) -> Result<&str, ManifestError> {
        self.string_field("name")
    }

    /// The declared `namespace/name` package reference
    pub fn package_ref(&self) -> Result<&str, ManifestError> {
        self.string_field("package")
    }

    /// The previously assigned application identifier, if any
    pub fn app_id(&self) -> Option<&str> {
        self.doc
            .get(&Value::String(APP_ID_KEY.to_string()))
            .and_then(Value::as_str)
    }

    /// Point this manifest at a fresh identity: set the app name to the bare
    /// package name, the package reference to `namespace/name`, and drop any
    /// stale application identifier.
    pub fn assign_identity(&mut self, identity: &PackageIdentity) {
        self.strip_app_id();
        self.doc.insert(
            Value::String("name".to_string()),
            Value::String(identity.app_name().to_string()),
        );
        self.doc.insert(
            Value::String("package".to_string()),
            Value::String(identity.full_name()),
        );
    }

    /// Remove the application identifier so the platform binds a fresh app.
    ///
    /// Returns `true` if the field was present.
    pub fn strip_app_id(&mut self) -> bool {
        self.doc.remove(&Value::String(APP_ID_KEY.to_string())).is_some()
    }

    /// Serialize the manifest back to a YAML string
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml::to_string(&self.doc)?)
    }

    /// Write the manifest back to disk
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    fn string_field(&self, field: &str) -> Result<&str, ManifestError> {
        self.doc
            .get(&Value::String(field.to_string()))
            .and_then(Value::as_str)
            .ok_or_else(|| ManifestError::Invalid(format!("missing app manifest field: {}", field)))
    }
}
