//! Typed client for the consumed CLI surface

use crate::{CliError, CliInvocation, CommandOutput, CommandRunner, ProcessRunner};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Configuration for the platform CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Name or path of the CLI binary
    pub binary: String,
    /// GraphQL registry endpoint passed via `--registry`
    pub registry: String,
    /// Auth token passed via `--token`, if any
    pub token: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            binary: "edge".to_string(),
            registry: "http://127.0.0.1:8080/graphql".to_string(),
            token: None,
        }
    }
}

/// Options for `app create`
#[derive(Debug, Clone, Default)]
pub struct AppCreateOptions {
    /// App name
    pub name: String,
    /// Owning namespace
    pub owner: String,
    /// Package reference (`namespace/name[@version]`)
    pub package: String,
    /// App type (e.g. `http`), if the platform needs one
    pub app_type: Option<String>,
    /// Do not wait for the app to come up
    pub no_wait: bool,
}

/// Subset of `app get --format json` output the harness consumes
#[derive(Debug, Clone, Deserialize)]
pub struct AppGet {
    /// Application identifier
    pub id: String,
    /// App name
    pub name: String,
    /// Public URL, when already routable
    #[serde(default)]
    pub url: Option<String>,
}

/// Typed wrapper around the platform CLI.
///
/// Every invocation gets the configured registry and token appended unless
/// the caller already supplied them, mirroring how a human would drive the
/// tool against a non-default environment.
#[derive(Debug)]
pub struct CliClient<R: CommandRunner = ProcessRunner> {
    config: CliConfig,
    runner: R,
}

impl CliClient<ProcessRunner> {
    /// Create a client that spawns real subprocesses
    pub fn new(config: CliConfig) -> Self {
        Self::with_runner(config, ProcessRunner)
    }
}

impl<R: CommandRunner> CliClient<R> {
    /// Create a client with a custom runner (used by tests)
    pub fn with_runner(config: CliConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// The client configuration
    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Run a CLI command, failing on a non-zero exit code
    pub async fn run(&self, args: Vec<String>, cwd: Option<&Path>) -> Result<CommandOutput, CliError> {
        let invocation = self.invocation(args, cwd);
        let output = self.runner.run(&invocation).await?;
        if !output.success() {
            return Err(CliError::CommandFailed {
                command: invocation.command_line(),
                code: output.code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }
        Ok(output)
    }

    /// Publish the package in `dir` to the registry.
    ///
    /// "Already published" responses still surface as
    /// [`CliError::CommandFailed`]; whether that is benign is a workflow
    /// decision, not a transport one.
    pub async fn publish(&self, dir: &Path) -> Result<CommandOutput, CliError> {
        debug!(dir = %dir.display(), "publishing package");
        self.run(vec!["publish".to_string(), dir.display().to_string()], None)
            .await
    }

    /// Deploy the app in `dir`, non-interactive and without waiting
    pub async fn deploy(&self, dir: &Path) -> Result<CommandOutput, CliError> {
        debug!(dir = %dir.display(), "deploying app");
        self.run(
            vec![
                "deploy".to_string(),
                "--path".to_string(),
                dir.display().to_string(),
                "--non-interactive".to_string(),
                "--no-wait".to_string(),
            ],
            None,
        )
        .await
    }

    /// Create an app from an already published package
    pub async fn app_create(&self, options: &AppCreateOptions) -> Result<CommandOutput, CliError> {
        let mut args = vec![
            "app".to_string(),
            "create".to_string(),
            "--non-interactive".to_string(),
            "--name".to_string(),
            options.name.clone(),
            "--owner".to_string(),
            options.owner.clone(),
            "--package".to_string(),
            options.package.clone(),
        ];
        if let Some(app_type) = &options.app_type {
            args.push("--type".to_string());
            args.push(app_type.clone());
        }
        if options.no_wait {
            args.push("--no-wait".to_string());
        }
        self.run(args, None).await
    }

    /// Human-readable app info
    pub async fn app_info(&self, app: &str) -> Result<CommandOutput, CliError> {
        self.run(vec!["app".to_string(), "info".to_string(), app.to_string()], None)
            .await
    }

    /// Structured app state via `app get --format json`
    pub async fn app_get(&self, app: &str) -> Result<AppGet, CliError> {
        let output = self
            .run(
                vec![
                    "app".to_string(),
                    "get".to_string(),
                    app.to_string(),
                    "--format".to_string(),
                    "json".to_string(),
                ],
                None,
            )
            .await?;
        serde_json::from_str(&output.stdout)
            .map_err(|err| CliError::InvalidOutput(format!("app get returned bad JSON: {}", err)))
    }

    /// List apps in a namespace via `app list --format json`
    pub async fn app_list(&self, namespace: &str) -> Result<Vec<AppGet>, CliError> {
        let output = self
            .run(
                vec![
                    "app".to_string(),
                    "list".to_string(),
                    "--namespace".to_string(),
                    namespace.to_string(),
                    "--format".to_string(),
                    "json".to_string(),
                ],
                None,
            )
            .await?;
        serde_json::from_str(&output.stdout)
            .map_err(|err| CliError::InvalidOutput(format!("app list returned bad JSON: {}", err)))
    }

    /// Delete an app by name or id
    pub async fn app_delete(&self, app: &str) -> Result<CommandOutput, CliError> {
        self.run(vec!["app".to_string(), "delete".to_string(), app.to_string()], None)
            .await
    }

    /// Run a command inside the sandbox of a package image
    pub async fn ssh(&self, package: &str, command: &[&str]) -> Result<CommandOutput, CliError> {
        let mut args = vec!["ssh".to_string(), package.to_string(), "--".to_string()];
        args.extend(command.iter().map(|part| part.to_string()));
        self.run(args, None).await
    }

    /// The authenticated user name, parsed from `whoami` output
    pub async fn whoami(&self) -> Result<String, CliError> {
        let output = self.run(vec!["whoami".to_string()], None).await?;
        parse_whoami(&output.stdout)
            .ok_or_else(|| CliError::InvalidOutput(format!("unrecognized whoami output: {:?}", output.stdout)))
    }

    fn invocation(&self, mut args: Vec<String>, cwd: Option<&Path>) -> CliInvocation {
        if !args.iter().any(|arg| arg == "--registry") {
            args.push("--registry".to_string());
            args.push(self.config.registry.clone());
        }
        if let Some(token) = &self.config.token {
            if !args.iter().any(|arg| arg == "--token") {
                args.push("--token".to_string());
                args.push(token.clone());
            }
        }
        let mut invocation = CliInvocation::new(self.config.binary.clone(), args);
        invocation.cwd = cwd.map(Path::to_path_buf);
        invocation
    }
}

/// Extract the user name from output like `logged in as user "alice"`
fn parse_whoami(stdout: &str) -> Option<String> {
    let marker = "as user \"";
    let start = stdout.find(marker)? + marker.len();
    let rest = &stdout[start..];
    let end = rest.find('"')?;
    let user = &rest[..end];
    if user.is_empty() {
        None
    } else {
        Some(user.to_string())
    }
}
