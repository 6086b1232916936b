//! Integration tests for the Edgekit harness
//!
//! These run the public API end to end against scripted CLI and registry
//! seams: no real platform, no network, no subprocesses. Tests that need a
//! live platform belong in the environment-specific suites that consume this
//! crate.

mod utils;

mod app_lifecycle_tests;
mod fixture_tests;
