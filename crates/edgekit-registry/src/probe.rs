//! Edge readiness probing
//!
//! A deployed app is "ready" once a GET against the edge entrypoint, with the
//! `Host` header set to the app's hostname, answers 200. Cold starts are
//! bounded on the platform, so readiness is a fixed-budget polling loop
//! rather than exponential backoff.

use crate::RegistryError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// Fixed polling budget for readiness checks
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Number of probes before giving up
    pub max_attempts: u32,
    /// Sleep between failed probes
    pub poll_interval: Duration,
    /// Per-request timeout
    pub probe_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            poll_interval: Duration::from_secs(3),
            probe_timeout: Duration::from_secs(30),
        }
    }
}

/// A single readiness probe against a hostname.
///
/// Implementations return the observed HTTP status; transport failures
/// (refused connection, timeout) are errors and count as failed attempts.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Probe the app behind `hostname` once
    async fn probe(&self, hostname: &str) -> Result<u16, RegistryError>;
}

/// Probe that issues real GETs against the edge entrypoint
#[derive(Debug, Clone)]
pub struct EdgeProbe {
    edge_url: String,
    http: reqwest::Client,
}

impl EdgeProbe {
    /// Create a probe against `edge_url` with the given per-request timeout
    pub fn new(edge_url: impl Into<String>, probe_timeout: Duration) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder().timeout(probe_timeout).build()?;
        Ok(Self {
            edge_url: edge_url.into(),
            http,
        })
    }

    /// The edge entrypoint URL this probe targets
    pub fn edge_url(&self) -> &str {
        &self.edge_url
    }
}

#[async_trait]
impl ReadinessProbe for EdgeProbe {
    async fn probe(&self, hostname: &str) -> Result<u16, RegistryError> {
        let response = self
            .http
            .get(&self.edge_url)
            .header(reqwest::header::HOST, hostname)
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}

/// Poll until the app behind `hostname` answers 200.
///
/// Returns `true` on the first 200, `false` once the attempt budget is
/// exhausted. Probe errors count as failed attempts.
pub async fn wait_until_ready(
    probe: &dyn ReadinessProbe,
    hostname: &str,
    policy: &RetryPolicy,
) -> bool {
    for attempt in 1..=policy.max_attempts {
        match probe.probe(hostname).await {
            Ok(200) => {
                info!(hostname, attempt, "app is ready");
                return true;
            }
            Ok(status) => {
                debug!(hostname, attempt, status, "app not ready yet");
            }
            Err(err) => {
                debug!(hostname, attempt, error = %err, "probe failed");
            }
        }
        if attempt != policy.max_attempts {
            sleep(policy.poll_interval).await;
        }
    }
    false
}
