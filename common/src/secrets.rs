// Secret resolver against the Google Secret Manager REST surface
//
// Runs with the ambient service-account identity: a bearer token is taken
// from the instance metadata server, then the configured secret version is
// accessed and its payload decoded into credentials.

use crate::config::SecretStoreConfig;
use crate::errors::SecretError;
use crate::models::BotCredentials;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

const METADATA_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// SecretManagerClient resolves the bot's application identity.
///
/// Credentials are fetched fresh on every call; every trigger invocation
/// costs one round trip to the store.
pub struct SecretManagerClient {
    client: Client,
    api_base_url: String,
    metadata_base_url: String,
    project_id: String,
    secret_name: String,
    secret_version: String,
}

/// `secrets.versions.access` response shape.
#[derive(Debug, Deserialize)]
struct AccessSecretVersionResponse {
    payload: SecretPayload,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    data: String,
}

impl SecretManagerClient {
    pub fn new(client: Client, config: &SecretStoreConfig) -> Self {
        Self {
            client,
            api_base_url: config.api_base_url.clone(),
            metadata_base_url: config.metadata_base_url.clone(),
            project_id: config.project_id.clone(),
            secret_name: config.secret_name.clone(),
            secret_version: config.secret_version.clone(),
        }
    }

    /// Obtain a service-account bearer token from the metadata server.
    #[tracing::instrument(skip(self))]
    async fn access_token(&self) -> Result<String, SecretError> {
        let url = format!("{}{}", self.metadata_base_url, METADATA_TOKEN_PATH);

        let response = self
            .client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| SecretError::TokenRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SecretError::TokenRequestFailed(format!(
                "metadata server returned status {}",
                response.status()
            )));
        }

        let token_response: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SecretError::TokenRequestFailed(e.to_string()))?;

        token_response
            .get("access_token")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or(SecretError::TokenMissing)
    }

    /// Resolve the configured secret version into bot credentials.
    #[tracing::instrument(skip(self), fields(secret = %self.secret_name, version = %self.secret_version))]
    pub async fn fetch_credentials(&self) -> Result<BotCredentials, SecretError> {
        let token = self.access_token().await?;

        let url = format!(
            "{}/v1/projects/{}/secrets/{}/versions/{}:access",
            self.api_base_url, self.project_id, self.secret_name, self.secret_version
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SecretError::StoreUnreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SecretError::StoreUnreachable(e.to_string()))?;

        if !status.is_success() {
            return Err(SecretError::AccessDenied {
                status: status.as_u16(),
                body,
            });
        }

        let version: AccessSecretVersionResponse = serde_json::from_str(&body)
            .map_err(|e| SecretError::MalformedCredentials(e.to_string()))?;

        let decoded = BASE64
            .decode(version.payload.data.as_bytes())
            .map_err(|e| SecretError::PayloadNotBase64(e.to_string()))?;

        serde_json::from_slice(&decoded)
            .map_err(|e| SecretError::MalformedCredentials(e.to_string()))
    }
}
