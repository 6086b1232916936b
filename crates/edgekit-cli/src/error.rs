//! Error types for CLI operations

use std::io;
use thiserror::Error;

/// CLI subprocess errors
#[derive(Debug, Error)]
pub enum CliError {
    /// The CLI binary could not be spawned
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// The command line that failed to start
        command: String,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The CLI exited with a non-zero code
    #[error("command `{command}` exited with code {code}: {stderr}")]
    CommandFailed {
        /// The command line that failed
        command: String,
        /// Exit code (-1 if terminated by signal)
        code: i32,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },

    /// The CLI produced output the client could not interpret
    #[error("unexpected command output: {0}")]
    InvalidOutput(String),

    /// I/O error while talking to the subprocess
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
