//! Shared scripted seams for the integration tests

use anyhow::{Context, Result};
use async_trait::async_trait;
use edgekit::cli::{CliError, CliInvocation, CommandOutput, CommandRunner};
use edgekit::manifest::{APP_MANIFEST, PACKAGE_MANIFEST};
use edgekit::registry::{RegistryError, VersionLookup};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Runner that records every invocation and answers from per-subcommand
/// canned outputs (anything unscripted succeeds with empty output)
pub struct ScriptedRunner {
    outputs: Mutex<HashMap<String, CommandOutput>>,
    invocations: Mutex<Vec<CliInvocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            outputs: Mutex::new(HashMap::new()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Script the output for a subcommand (e.g. `"publish"`, `"app"`)
    pub fn script(&self, subcommand: &str, output: CommandOutput) {
        self.outputs
            .lock()
            .unwrap()
            .insert(subcommand.to_string(), output);
    }

    pub fn ok(stdout: &str) -> CommandOutput {
        CommandOutput {
            code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn invocations(&self) -> Vec<CliInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Number of recorded invocations of a subcommand
    pub fn count(&self, subcommand: &str) -> usize {
        self.invocations()
            .iter()
            .filter(|invocation| invocation.args.first().map(String::as_str) == Some(subcommand))
            .count()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, invocation: &CliInvocation) -> Result<CommandOutput, CliError> {
        self.invocations.lock().unwrap().push(invocation.clone());
        let subcommand = invocation.args.first().cloned().unwrap_or_default();
        Ok(self
            .outputs
            .lock()
            .unwrap()
            .get(&subcommand)
            .cloned()
            .unwrap_or_else(|| ScriptedRunner::ok("")))
    }
}

/// Version lookup that replays a fixed sequence of registry answers
pub struct SequenceLookup {
    answers: Mutex<Vec<Option<String>>>,
}

impl SequenceLookup {
    /// Answers are consumed front to back; the last one repeats
    pub fn new(answers: Vec<Option<&str>>) -> Self {
        Self {
            answers: Mutex::new(
                answers
                    .into_iter()
                    .map(|answer| answer.map(str::to_string))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl VersionLookup for SequenceLookup {
    async fn latest_version(&self, _package: &str) -> Result<Option<String>, RegistryError> {
        let mut answers = self.answers.lock().unwrap();
        if answers.len() > 1 {
            Ok(answers.remove(0))
        } else {
            Ok(answers.first().cloned().flatten())
        }
    }
}

/// Write a fixture directory with the standard manifest pair
pub fn write_fixture(root: &Path, name: &str, package: &str, version: &str) -> Result<PathBuf> {
    let dir = root.join(name);
    fs::create_dir(&dir).context("Failed to create fixture directory")?;
    fs::write(
        dir.join(PACKAGE_MANIFEST),
        format!("[package]\nname = \"{}\"\nversion = \"{}\"\n", package, version),
    )
    .context("Failed to write package manifest")?;
    let app_name = package.split('/').next_back().unwrap_or(package);
    fs::write(
        dir.join(APP_MANIFEST),
        format!("kind: App.v0\nname: {}\npackage: {}\n", app_name, package),
    )
    .context("Failed to write app manifest")?;
    Ok(dir)
}
