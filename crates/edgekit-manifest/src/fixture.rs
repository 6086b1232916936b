//! Fixture discovery and batch rename/restore
//!
//! A fixture tree holds one subdirectory per fixture, each with a package
//! manifest and an app manifest. Before a test run every fixture is given a
//! fresh random registry identity so parallel CI runs sharing the tree cannot
//! collide; afterwards the originals are restored from `.bak` backups so the
//! tree in source control is never permanently mutated.

use crate::{AppManifest, ManifestError, PackageIdentity, PackageManifest, APP_MANIFEST, PACKAGE_MANIFEST};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The two manifest files that make up a fixture
#[derive(Debug, Clone)]
pub struct FixturePair {
    /// Fixture directory
    pub dir: PathBuf,
    /// Path to the package manifest
    pub package_manifest: PathBuf,
    /// Path to the app manifest
    pub app_manifest: PathBuf,
}

impl FixturePair {
    /// Locate both manifests in a fixture directory.
    ///
    /// Fails with [`ManifestError::Missing`] if either file is absent.
    pub fn locate(dir: &Path) -> Result<Self, ManifestError> {
        let package_manifest = dir.join(PACKAGE_MANIFEST);
        let app_manifest = dir.join(APP_MANIFEST);
        for path in [&package_manifest, &app_manifest] {
            if !path.exists() {
                return Err(ManifestError::Missing(path.clone()));
            }
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            package_manifest,
            app_manifest,
        })
    }
}

/// Per-fixture result of a batch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureStatus {
    /// The fixture was rewritten with the given identity
    Renamed(PackageIdentity),
    /// Backups (if any) were moved back over the live manifests
    Restored,
    /// The fixture could not be processed; the batch continued
    Failed(String),
}

/// Outcome of a batch operation for a single fixture directory
#[derive(Debug, Clone)]
pub struct FixtureOutcome {
    /// The fixture directory
    pub dir: PathBuf,
    /// What happened to it
    pub status: FixtureStatus,
}

impl FixtureOutcome {
    /// Whether this fixture was processed successfully
    pub fn is_ok(&self) -> bool {
        !matches!(self.status, FixtureStatus::Failed(_))
    }
}

/// The backup path for a manifest file (`<file>.bak`)
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// Assign a fresh random identity to every fixture under `root`.
///
/// Each fixture gets its manifests backed up to `<file>.bak` (unless a backup
/// already exists, which is warned about and overwritten past — a concurrent
/// run may be in progress), its package name set to `namespace/<random>`, and
/// its app manifest pointed at the same identity with any stale `app_id`
/// removed.
///
/// Per-fixture failures are recorded in the returned outcomes and do not stop
/// the batch. Only an unreadable `root` is a hard error.
pub fn rename_fixtures(root: &Path, namespace: &str) -> Result<Vec<FixtureOutcome>, ManifestError> {
    let mut outcomes = Vec::new();
    for dir in fixture_dirs(root)? {
        let status = match rename_fixture(&dir, namespace) {
            Ok(identity) => {
                debug!(dir = %dir.display(), identity = %identity, "renamed fixture");
                FixtureStatus::Renamed(identity)
            }
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "failed to rename fixture");
                FixtureStatus::Failed(err.to_string())
            }
        };
        outcomes.push(FixtureOutcome { dir, status });
    }
    Ok(outcomes)
}

/// Restore every fixture under `root` from its backups.
///
/// A pure rename of `<file>.bak` over the live file; a missing backup is a
/// no-op, so repeated restores converge on the same on-disk state.
pub fn restore_fixtures(root: &Path) -> Result<Vec<FixtureOutcome>, ManifestError> {
    let mut outcomes = Vec::new();
    for dir in fixture_dirs(root)? {
        let status = match restore_fixture(&dir) {
            Ok(restored) => {
                debug!(dir = %dir.display(), restored, "restored fixture");
                FixtureStatus::Restored
            }
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "failed to restore fixture");
                FixtureStatus::Failed(err.to_string())
            }
        };
        outcomes.push(FixtureOutcome { dir, status });
    }
    Ok(outcomes)
}

/// Immediate subdirectories of the fixture root, in stable order
fn fixture_dirs(root: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn rename_fixture(dir: &Path, namespace: &str) -> Result<PackageIdentity, ManifestError> {
    let identity = PackageIdentity::random(namespace)?;
    let pair = FixturePair::locate(dir)?;

    back_up(&pair.package_manifest)?;
    let mut package = PackageManifest::load(&pair.package_manifest)?;
    package.set_name(&identity)?;
    package.save(&pair.package_manifest)?;

    back_up(&pair.app_manifest)?;
    let mut app = AppManifest::load(&pair.app_manifest)?;
    app.assign_identity(&identity);
    app.save(&pair.app_manifest)?;

    Ok(identity)
}

fn restore_fixture(dir: &Path) -> Result<u32, ManifestError> {
    let mut restored = 0;
    for file in [PACKAGE_MANIFEST, APP_MANIFEST] {
        let live = dir.join(file);
        let backup = backup_path(&live);
        if backup.exists() {
            fs::rename(&backup, &live)?;
            restored += 1;
        }
    }
    Ok(restored)
}

/// Copy a manifest to its backup path, unless a backup already exists.
///
/// An existing backup likely means another test instance is running against
/// the same tree; the live file is still overwritten afterwards.
fn back_up(path: &Path) -> Result<(), ManifestError> {
    let backup = backup_path(path);
    if backup.exists() {
        warn!(
            backup = %backup.display(),
            "backup file already exists; another test instance may be running"
        );
        return Ok(());
    }
    fs::copy(path, &backup)?;
    Ok(())
}
