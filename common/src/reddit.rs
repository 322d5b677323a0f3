// Reddit bot client: script-app OAuth2 login and link submission

use crate::config::RedditConfig;
use crate::errors::PostError;
use crate::models::BotCredentials;
use crate::poster::LinkPoster;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

/// RedditClient turns resolved credentials into an authenticated session.
pub struct RedditClient {
    client: Client,
    auth_base_url: String,
    api_base_url: String,
    user_agent: String,
    subreddit: String,
    rate_limit: Duration,
}

impl RedditClient {
    pub fn new(client: Client, config: &RedditConfig) -> Self {
        Self {
            client,
            auth_base_url: config.auth_base_url.clone(),
            api_base_url: config.api_base_url.clone(),
            user_agent: config.user_agent.clone(),
            subreddit: config.subreddit.clone(),
            rate_limit: Duration::from_secs(config.rate_limit_seconds),
        }
    }

    /// Acquire an OAuth2 token via the password grant for script apps.
    #[tracing::instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &BotCredentials) -> Result<RedditSession, PostError> {
        let params = [
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let response = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_base_url))
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header(USER_AGENT, &self.user_agent)
            .form(&params)
            .send()
            .await
            .map_err(|e| PostError::SessionCreationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PostError::SessionCreationFailed(format!(
                "token request failed with status {status}: {body}"
            )));
        }

        let token_response: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PostError::SessionCreationFailed(e.to_string()))?;

        let token = token_response
            .get("access_token")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                PostError::SessionCreationFailed(
                    "token response missing access_token field".to_string(),
                )
            })?;

        tracing::info!("Bot session created");

        Ok(RedditSession {
            client: self.client.clone(),
            api_base_url: self.api_base_url.clone(),
            user_agent: self.user_agent.clone(),
            subreddit: self.subreddit.clone(),
            rate_limit: self.rate_limit,
            token,
        })
    }
}

/// An authenticated bot session bound to one destination subreddit.
pub struct RedditSession {
    client: Client,
    api_base_url: String,
    user_agent: String,
    subreddit: String,
    rate_limit: Duration,
    token: String,
}

#[async_trait]
impl LinkPoster for RedditSession {
    /// Submit one link post to the configured subreddit.
    ///
    /// Reddit reports many submission failures inside a 200 response as a
    /// `json.errors` array, so both the status and that array are checked.
    #[tracing::instrument(skip(self, url))]
    async fn submit_link(&self, title: &str, url: &str) -> Result<(), PostError> {
        let params = [
            ("sr", self.subreddit.as_str()),
            ("kind", "link"),
            ("title", title),
            ("url", url),
            ("api_type", "json"),
            ("resubmit", "true"),
        ];

        let response = self
            .client
            .post(format!("{}/api/submit", self.api_base_url))
            .bearer_auth(&self.token)
            .header(USER_AGENT, &self.user_agent)
            .form(&params)
            .send()
            .await
            .map_err(|e| PostError::SubmissionRequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(PostError::SubmissionRejected {
                title: title.to_string(),
                reason: format!("status {status}: {body}"),
            });
        }

        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(errors) = value.pointer("/json/errors").and_then(|e| e.as_array()) {
                if !errors.is_empty() {
                    return Err(PostError::SubmissionRejected {
                        title: title.to_string(),
                        reason: serde_json::to_string(errors).unwrap_or_default(),
                    });
                }
            }
        }

        tracing::info!(subreddit = %self.subreddit, "Link submitted");

        if !self.rate_limit.is_zero() {
            tokio::time::sleep(self.rate_limit).await;
        }

        Ok(())
    }
}
