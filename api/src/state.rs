use std::sync::Arc;

use common::config::Settings;
use common::mobilize::MobilizeClient;
use common::reddit::RedditClient;
use common::secrets::SecretManagerClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub secrets: Arc<SecretManagerClient>,
    pub mobilize: Arc<MobilizeClient>,
    pub reddit: Arc<RedditClient>,
}

impl AppState {
    /// Create a new AppState instance.
    ///
    /// One reqwest client backs all three outbound dependencies; its
    /// connection pool is the only state shared between requests. No
    /// timeout is configured: a hung downstream blocks its request.
    pub fn new(config: Settings) -> Self {
        let http = reqwest::Client::new();

        Self {
            secrets: Arc::new(SecretManagerClient::new(http.clone(), &config.secret_store)),
            mobilize: Arc::new(MobilizeClient::new(http.clone(), &config.mobilize)),
            reddit: Arc::new(RedditClient::new(http, &config.reddit)),
            config: Arc::new(config),
        }
    }
}
