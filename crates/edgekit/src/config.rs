//! Environment-variable configuration
//!
//! Every endpoint the harness talks to is override-able through the
//! environment so one suite can be pointed at local, staging or production
//! platforms. Composed URLs (`EDGE_URL`, `REGISTRY`) win over their
//! scheme/host/port parts when set explicitly.

use edgekit_cli::CliConfig;
use edgekit_registry::RegistryClient;
use std::env;

/// Scheme of the edge entrypoint (default `http`)
pub const ENV_EDGE_SCHEME: &str = "EDGE_SCHEME";
/// Host of the edge entrypoint (default `127.0.0.1`, falls back to `HOST`)
pub const ENV_EDGE_HOST: &str = "EDGE_HOST";
/// Port of the edge entrypoint (default `8080`, falls back to `PORT`)
pub const ENV_EDGE_PORT: &str = "EDGE_PORT";
/// Full edge entrypoint URL; overrides the composed scheme/host/port
pub const ENV_EDGE_URL: &str = "EDGE_URL";
/// Scheme of the registry endpoint (default `http`)
pub const ENV_REGISTRY_SCHEME: &str = "REGISTRY_SCHEME";
/// Host of the registry endpoint (default `127.0.0.1`)
pub const ENV_REGISTRY_HOST: &str = "REGISTRY_HOST";
/// Port of the registry endpoint (default `8080`)
pub const ENV_REGISTRY_PORT: &str = "REGISTRY_PORT";
/// Full registry GraphQL URL; overrides the composed scheme/host/port
pub const ENV_REGISTRY: &str = "REGISTRY";
/// Generic entrypoint host, used when `EDGE_HOST` is unset
pub const ENV_HOST: &str = "HOST";
/// Generic entrypoint port, used when `EDGE_PORT` is unset
pub const ENV_PORT: &str = "PORT";
/// Domain deployed apps are reachable under (default `edge.local`)
pub const ENV_APP_DOMAIN: &str = "EDGE_APP_DOMAIN";
/// Auth token forwarded to the CLI and registry
pub const ENV_TOKEN: &str = "EDGE_TOKEN";
/// Default namespace for fixture identities
pub const ENV_NAMESPACE: &str = "EDGE_NAMESPACE";
/// Name or path of the platform CLI binary (default `edge`)
pub const ENV_CLI: &str = "EDGE_CLI";

/// Resolved harness configuration.
///
/// Plain data: tests construct it directly instead of going through the
/// process environment.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Edge entrypoint URL probed for readiness
    pub edge_url: String,
    /// Registry GraphQL endpoint
    pub registry_url: String,
    /// Domain deployed apps are reachable under
    pub app_domain: String,
    /// Auth token, if any
    pub token: Option<String>,
    /// Default namespace for fixture identities, if configured
    pub namespace: Option<String>,
    /// Name or path of the platform CLI binary
    pub cli_binary: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            edge_url: "http://127.0.0.1:8080".to_string(),
            registry_url: "http://127.0.0.1:8080/graphql".to_string(),
            app_domain: "edge.local".to_string(),
            token: None,
            namespace: None,
            cli_binary: "edge".to_string(),
        }
    }
}

impl EnvConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let edge_scheme = lookup(ENV_EDGE_SCHEME).unwrap_or_else(|| "http".to_string());
        let edge_host = lookup(ENV_EDGE_HOST)
            .or_else(|| lookup(ENV_HOST))
            .unwrap_or_else(|| "127.0.0.1".to_string());
        let edge_port = lookup(ENV_EDGE_PORT)
            .or_else(|| lookup(ENV_PORT))
            .unwrap_or_else(|| "8080".to_string());
        let edge_url = lookup(ENV_EDGE_URL)
            .unwrap_or_else(|| format!("{}://{}:{}", edge_scheme, edge_host, edge_port));

        let registry_scheme = lookup(ENV_REGISTRY_SCHEME).unwrap_or_else(|| "http".to_string());
        let registry_host = lookup(ENV_REGISTRY_HOST).unwrap_or_else(|| "127.0.0.1".to_string());
        let registry_port = lookup(ENV_REGISTRY_PORT).unwrap_or_else(|| "8080".to_string());
        let registry_url = lookup(ENV_REGISTRY).unwrap_or_else(|| {
            format!("{}://{}:{}/graphql", registry_scheme, registry_host, registry_port)
        });

        Self {
            edge_url,
            registry_url,
            app_domain: lookup(ENV_APP_DOMAIN).unwrap_or_else(|| "edge.local".to_string()),
            token: lookup(ENV_TOKEN),
            namespace: lookup(ENV_NAMESPACE),
            cli_binary: lookup(ENV_CLI).unwrap_or_else(|| "edge".to_string()),
        }
    }

    /// CLI configuration derived from this environment
    pub fn cli_config(&self) -> CliConfig {
        CliConfig {
            binary: self.cli_binary.clone(),
            registry: self.registry_url.clone(),
            token: self.token.clone(),
        }
    }

    /// Registry client for this environment
    pub fn registry_client(&self) -> RegistryClient {
        let client = RegistryClient::new(self.registry_url.clone());
        match &self.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    /// The hostname a deployed app is reachable under
    pub fn hostname_for(&self, app_name: &str) -> String {
        format!("{}.{}", app_name, self.app_domain)
    }
}
