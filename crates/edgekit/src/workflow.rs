//! The deploy-and-wait workflow
//!
//! Turns a fixture directory into a reachable hostname: read the manifest
//! pair, publish the package unless the registry already has the declared
//! version, deploy without waiting, and derive the app's public hostname.
//! Readiness is checked separately with a fixed polling budget.

use crate::{EdgekitError, EnvConfig, Result};
use edgekit_cli::{CliClient, CliError, CommandRunner, ProcessRunner};
use edgekit_manifest::{AppManifest, FixturePair, PackageManifest};
use edgekit_registry::{wait_until_ready, EdgeProbe, RegistryClient, RetryPolicy, VersionLookup};
use std::path::Path;
use tracing::{debug, info};

/// An app the workflow has handed to the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedApp {
    /// Declared app name
    pub app_name: String,
    /// Externally reachable hostname (`<app_name>.<app_domain>`)
    pub hostname: String,
    /// Full package reference (`namespace/name`)
    pub package_name: String,
    /// Declared package version
    pub package_version: String,
}

/// The publish-and-deploy workflow.
///
/// Holds the resolved environment plus the two external seams (CLI runner,
/// registry lookup) so tests can substitute both.
#[derive(Debug)]
pub struct Deployer<R: CommandRunner = ProcessRunner, V: VersionLookup = RegistryClient> {
    config: EnvConfig,
    cli: CliClient<R>,
    registry: V,
}

impl Deployer {
    /// Build a deployer from the process environment
    pub fn from_env() -> Self {
        let config = EnvConfig::from_env();
        let cli = CliClient::new(config.cli_config());
        let registry = config.registry_client();
        Self::new(config, cli, registry)
    }
}

impl<R: CommandRunner, V: VersionLookup> Deployer<R, V> {
    /// Build a deployer from explicit parts
    pub fn new(config: EnvConfig, cli: CliClient<R>, registry: V) -> Self {
        Self {
            config,
            cli,
            registry,
        }
    }

    /// The resolved configuration
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// The CLI client used for publish/deploy
    pub fn cli(&self) -> &CliClient<R> {
        &self.cli
    }

    /// Publish (if needed) and deploy the fixture in `dir`.
    ///
    /// The publish step is skipped when the registry's latest version of the
    /// declared package already equals the declared version, so repeated runs
    /// against an unchanged fixture do not re-publish. A publish rejected
    /// because the version already exists is treated as success: another
    /// runner may have published the same version concurrently.
    ///
    /// Deploy failures are fatal. The returned hostname is derived from the
    /// app name and the configured app domain; the app may not be ready yet.
    pub async fn deploy_app(&self, dir: &Path) -> Result<DeployedApp> {
        let pair = FixturePair::locate(dir)?;

        let package = PackageManifest::load(&pair.package_manifest)?;
        let package_name = package.name()?.to_string();
        let package_version = package.version()?.to_string();

        let mut app = AppManifest::load(&pair.app_manifest)?;
        let app_name = app.name()?.to_string();
        if app.strip_app_id() {
            // Force the platform to bind a fresh app identity server-side.
            app.save(&pair.app_manifest)?;
            debug!(dir = %dir.display(), "stripped stale app_id from app manifest");
        }

        let latest = self.registry.latest_version(&package_name).await?;
        if latest.as_deref() == Some(package_version.as_str()) {
            debug!(
                package = %package_name,
                version = %package_version,
                "package version already published, skipping publish"
            );
        } else {
            match self.cli.publish(&pair.dir).await {
                Ok(_) => {
                    info!(package = %package_name, version = %package_version, "published package");
                }
                Err(CliError::CommandFailed { ref stderr, ref stdout, .. })
                    if is_already_published(stderr) || is_already_published(stdout) =>
                {
                    info!(
                        package = %package_name,
                        "package already exists in registry, treating publish as success"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        self.cli.deploy(&pair.dir).await?;

        let hostname = self.config.hostname_for(&app_name);
        info!(app = %app_name, hostname = %hostname, "app deployed");
        Ok(DeployedApp {
            app_name,
            hostname,
            package_name,
            package_version,
        })
    }

    /// Poll the deployed app until it answers 200, with the default budget
    pub async fn wait_until_ready(&self, app: &DeployedApp) -> Result<()> {
        self.wait_until_ready_with(app, &RetryPolicy::default()).await
    }

    /// Poll the deployed app until it answers 200, with an explicit budget
    pub async fn wait_until_ready_with(&self, app: &DeployedApp, policy: &RetryPolicy) -> Result<()> {
        let probe = EdgeProbe::new(self.config.edge_url.clone(), policy.probe_timeout)?;
        if wait_until_ready(&probe, &app.hostname, policy).await {
            Ok(())
        } else {
            Err(EdgekitError::ReadinessTimeout {
                hostname: app.hostname.clone(),
                attempts: policy.max_attempts,
            })
        }
    }
}

/// Whether a failed publish means the version is already in the registry
fn is_already_published(output: &str) -> bool {
    let lower = output.to_lowercase();
    lower.contains("already exists") || lower.contains("already published")
}
