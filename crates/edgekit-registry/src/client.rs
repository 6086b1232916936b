//! GraphQL registry client

use crate::RegistryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

const LATEST_VERSION_QUERY: &str = r#"
query ($name: String!) {
  getPackage(name: $name) {
    lastVersion {
      version
    }
  }
}
"#;

const TOKEN_AUTH_MUTATION: &str = r#"
mutation ($username: String!, $password: String!) {
  tokenAuth(input: { username: $username, password: $password }) {
    token
  }
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Latest-version lookup seam for the deploy workflow.
///
/// The real implementation asks the registry; tests answer from a fixed map.
#[async_trait]
pub trait VersionLookup: Send + Sync {
    /// The latest published version of `package` (`namespace/name`), or
    /// `None` if the package has never been published.
    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError>;
}

#[async_trait]
impl<T: VersionLookup + ?Sized> VersionLookup for std::sync::Arc<T> {
    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError> {
        (**self).latest_version(package).await
    }
}

/// Client for the registry's single GraphQL endpoint
#[derive(Debug, Clone)]
pub struct RegistryClient {
    url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl RegistryClient {
    /// Create a client for the given GraphQL endpoint
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a `{query, variables}` POST and return the `data` payload.
    ///
    /// A non-200 status or a present `errors` array is an error.
    pub async fn query(&self, query: &str, variables: Value) -> Result<Value, RegistryError> {
        debug!(url = %self.url, "sending GraphQL query");
        let mut request = self
            .http
            .post(&self.url)
            .json(&GraphQlRequest { query, variables });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, &body)
    }

    /// Obtain an auth token via the `tokenAuth` mutation
    pub async fn token_auth(&self, username: &str, password: &str) -> Result<String, RegistryError> {
        let data = self
            .query(
                TOKEN_AUTH_MUTATION,
                json!({ "username": username, "password": password }),
            )
            .await?;
        extract_token(&data)
    }
}

#[async_trait]
impl VersionLookup for RegistryClient {
    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError> {
        let data = self
            .query(LATEST_VERSION_QUERY, json!({ "name": package }))
            .await?;
        Ok(extract_latest_version(&data))
    }
}

/// Decode a raw GraphQL HTTP response into its `data` payload
fn decode_response(status: u16, body: &str) -> Result<Value, RegistryError> {
    if status != 200 {
        return Err(RegistryError::Status {
            status,
            body: body.to_string(),
        });
    }
    let response: GraphQlResponse = serde_json::from_str(body)?;
    if let Some(errors) = response.errors {
        let messages: Vec<String> = errors.into_iter().map(|err| err.message).collect();
        return Err(RegistryError::GraphQl(messages.join("; ")));
    }
    response
        .data
        .ok_or_else(|| RegistryError::MissingData("data".to_string()))
}

/// Pull `getPackage.lastVersion.version` out of a query result.
///
/// A null `getPackage` means the package was never published.
fn extract_latest_version(data: &Value) -> Option<String> {
    data.get("getPackage")?
        .get("lastVersion")?
        .get("version")?
        .as_str()
        .map(str::to_string)
}

fn extract_token(data: &Value) -> Result<String, RegistryError> {
    data.get("tokenAuth")
        .and_then(|auth| auth.get("token"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RegistryError::MissingData("tokenAuth.token".to_string()))
}
