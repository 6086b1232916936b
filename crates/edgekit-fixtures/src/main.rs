//! Edgekit fixture maintenance tool
//!
//! `rename` gives every fixture under a tree a fresh random registry
//! identity so parallel test runs cannot collide; `restore` moves the `.bak`
//! backups back so the tree matches source control again. Both are
//! best-effort batch operations: a broken fixture is reported and skipped.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use edgekit::cli::CliClient;
use edgekit::manifest::{rename_fixtures, restore_fixtures, FixtureOutcome, FixtureStatus};
use edgekit::EnvConfig;

#[derive(Parser)]
#[command(name = "edgekit-fixtures", about = "Rename or restore Edgekit fixture trees")]
struct Args {
    /// Root directory holding one subdirectory per fixture
    #[arg(long, default_value = "packages")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assign fresh random identities to all fixtures
    Rename {
        /// Namespace for the new identities; defaults to the CLI's
        /// authenticated user
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Move manifest backups back over the live files
    Restore,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = EnvConfig::from_env();

    let outcomes = match args.command {
        Command::Rename { namespace } => {
            let namespace = match namespace.or_else(|| config.namespace.clone()) {
                Some(namespace) => namespace,
                None => default_namespace(&config).await?,
            };
            info!(root = %args.root.display(), namespace = %namespace, "renaming fixtures");
            rename_fixtures(&args.root, &namespace)
                .with_context(|| format!("failed to scan fixture root {}", args.root.display()))?
        }
        Command::Restore => {
            info!(root = %args.root.display(), "restoring fixtures");
            restore_fixtures(&args.root)
                .with_context(|| format!("failed to scan fixture root {}", args.root.display()))?
        }
    };

    report(&outcomes);
    Ok(())
}

/// Ask the platform CLI who we are logged in as
async fn default_namespace(config: &EnvConfig) -> Result<String> {
    let client = CliClient::new(config.cli_config());
    let user = client
        .whoami()
        .await
        .context("could not resolve a default namespace; pass --namespace or set EDGE_NAMESPACE")?;
    Ok(user)
}

fn report(outcomes: &[FixtureOutcome]) {
    if outcomes.is_empty() {
        warn!("no fixture directories found under the given root");
    }
    for outcome in outcomes {
        match &outcome.status {
            FixtureStatus::Renamed(identity) => {
                info!(dir = %outcome.dir.display(), identity = %identity, "renamed");
            }
            FixtureStatus::Restored => {
                info!(dir = %outcome.dir.display(), "restored");
            }
            FixtureStatus::Failed(reason) => {
                warn!(dir = %outcome.dir.display(), reason = %reason, "failed");
            }
        }
    }
    let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
    info!(total = outcomes.len(), failed, "done");
}
