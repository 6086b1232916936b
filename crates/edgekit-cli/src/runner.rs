//! Command invocation and the runner trait

use crate::CliError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// A fully assembled CLI invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliInvocation {
    /// Program name or path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Extra environment variables for the child process
    pub env: Vec<(String, String)>,
    /// Working directory, if different from the caller's
    pub cwd: Option<PathBuf>,
    /// Data to feed on standard input
    pub stdin: Option<String>,
}

impl CliInvocation {
    /// Create an invocation with just a program and arguments
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            env: Vec::new(),
            cwd: None,
            stdin: None,
        }
    }

    /// The command line as a printable string
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Captured output of a finished subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (-1 if terminated by signal)
    pub code: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with code zero
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Abstraction over subprocess execution.
///
/// The real implementation spawns the platform CLI; tests supply scripted
/// runners that record invocations and replay canned outputs.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the invocation to completion and capture its output.
    ///
    /// A non-zero exit code is not an error at this layer; callers decide
    /// what exit codes mean.
    async fn run(&self, invocation: &CliInvocation) -> Result<CommandOutput, CliError>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<T> {
    async fn run(&self, invocation: &CliInvocation) -> Result<CommandOutput, CliError> {
        (**self).run(invocation).await
    }
}

/// Runner that spawns real subprocesses via `tokio::process`
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &CliInvocation) -> Result<CommandOutput, CliError> {
        debug!(command = %invocation.command_line(), cwd = ?invocation.cwd, "running command");

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }

        let mut child = command.spawn().map_err(|source| CliError::Spawn {
            command: invocation.command_line(),
            source,
        })?;

        if let Some(input) = &invocation.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(input.as_bytes()).await?;
                stdin.shutdown().await?;
            }
        }

        let output = child.wait_with_output().await?;
        let result = CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(code = result.code, "command finished");
        Ok(result)
    }
}
