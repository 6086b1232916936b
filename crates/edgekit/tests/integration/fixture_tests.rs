//! Fixture tree rename/restore behavior across whole trees

use crate::utils::write_fixture;
use anyhow::Result;
use edgekit::manifest::{
    backup_path, rename_fixtures, restore_fixtures, FixtureStatus, APP_MANIFEST, PACKAGE_MANIFEST,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn whole_tree_round_trip_is_byte_identical() -> Result<()> {
    let root = TempDir::new()?;
    let dirs = vec![
        write_fixture(root.path(), "echo", "acme/echo", "1.0.0")?,
        write_fixture(root.path(), "static", "acme/static-site", "0.3.1")?,
        write_fixture(root.path(), "winter", "acme/winter", "2.0.0")?,
    ];
    let mut originals = Vec::new();
    for dir in &dirs {
        originals.push((
            fs::read_to_string(dir.join(PACKAGE_MANIFEST))?,
            fs::read_to_string(dir.join(APP_MANIFEST))?,
        ));
    }

    let outcomes = rename_fixtures(root.path(), "ci")?;
    assert!(outcomes
        .iter()
        .all(|outcome| matches!(outcome.status, FixtureStatus::Renamed(_))));

    restore_fixtures(root.path())?;
    for (dir, (package_raw, app_raw)) in dirs.iter().zip(&originals) {
        assert_eq!(&fs::read_to_string(dir.join(PACKAGE_MANIFEST))?, package_raw);
        assert_eq!(&fs::read_to_string(dir.join(APP_MANIFEST))?, app_raw);
        assert!(!backup_path(&dir.join(PACKAGE_MANIFEST)).exists());
    }
    Ok(())
}

#[test]
fn double_rename_keeps_the_first_backup() -> Result<()> {
    // Two rename passes without a restore in between simulate two runs
    // stomping the same tree. The first backup must survive so a restore
    // still recovers the source-control originals.
    let root = TempDir::new()?;
    let dir = write_fixture(root.path(), "echo", "acme/echo", "1.0.0")?;
    let original = fs::read_to_string(dir.join(PACKAGE_MANIFEST))?;

    rename_fixtures(root.path(), "ci")?;
    rename_fixtures(root.path(), "ci")?;

    restore_fixtures(root.path())?;
    assert_eq!(fs::read_to_string(dir.join(PACKAGE_MANIFEST))?, original);
    Ok(())
}

#[test]
fn restore_without_rename_is_a_no_op() -> Result<()> {
    let root = TempDir::new()?;
    let dir = write_fixture(root.path(), "echo", "acme/echo", "1.0.0")?;
    let original = fs::read_to_string(dir.join(PACKAGE_MANIFEST))?;

    let outcomes = restore_fixtures(root.path())?;
    assert!(matches!(outcomes[0].status, FixtureStatus::Restored));
    assert_eq!(fs::read_to_string(dir.join(PACKAGE_MANIFEST))?, original);
    Ok(())
}
