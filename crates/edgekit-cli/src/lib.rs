//! # Edgekit CLI
//!
//! Subprocess transport to the external platform CLI.
//!
//! The deployment platform is reached through its own command-line tool
//! (`publish`, `deploy`, `app ...`, `ssh`, `whoami`). This crate wraps those
//! invocations behind a typed client so the workflow code never builds raw
//! argument vectors, and behind a [`CommandRunner`] trait so tests can script
//! subprocess behavior without spawning anything.

#![warn(missing_docs)]

/// Command invocation and the runner trait
pub mod runner;

/// Typed client for the consumed CLI surface
pub mod client;

/// Error types for CLI operations
pub mod error;

pub use runner::{CliInvocation, CommandOutput, CommandRunner, ProcessRunner};
pub use client::{AppCreateOptions, AppGet, CliClient, CliConfig};
pub use error::CliError;
