// Configuration management with layered configuration (defaults, file, env)

use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure containing all configuration options.
///
/// Production values live in `Default` so the deployed unit runs without a
/// config file; files and `APP__`-prefixed environment variables override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub window: WindowConfig,
    pub mobilize: MobilizeConfig,
    pub reddit: RedditConfig,
    pub secret_store: SecretStoreConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Date window policy: which wall-clock zone "tomorrow" is computed in,
/// and how that zone is labelled in post titles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub timezone: Tz,
    pub timezone_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobilizeConfig {
    pub base_url: String,
    pub organization_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    pub auth_base_url: String,
    pub api_base_url: String,
    pub user_agent: String,
    pub subreddit: String,
    /// Seconds to pause after each submission; 0 means unthrottled.
    pub rate_limit_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretStoreConfig {
    pub api_base_url: String,
    pub metadata_base_url: String,
    pub project_id: String,
    pub secret_name: String,
    pub secret_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
}

impl Settings {
    /// Load configuration with layered precedence: defaults → file → env
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with built-in production defaults
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Local overrides (not committed to git)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if self.window.timezone_label.is_empty() {
            return Err("Window timezone_label cannot be empty".to_string());
        }

        if self.mobilize.base_url.is_empty() {
            return Err("Mobilize base_url cannot be empty".to_string());
        }
        if self.mobilize.organization_id == 0 {
            return Err("Mobilize organization_id must be greater than 0".to_string());
        }

        if self.reddit.auth_base_url.is_empty() || self.reddit.api_base_url.is_empty() {
            return Err("Reddit base URLs cannot be empty".to_string());
        }
        if self.reddit.user_agent.is_empty() {
            return Err("Reddit user_agent cannot be empty".to_string());
        }
        if self.reddit.subreddit.is_empty() {
            return Err("Reddit subreddit cannot be empty".to_string());
        }

        if self.secret_store.api_base_url.is_empty()
            || self.secret_store.metadata_base_url.is_empty()
        {
            return Err("Secret store base URLs cannot be empty".to_string());
        }
        if self.secret_store.project_id.is_empty() {
            return Err("Secret store project_id cannot be empty".to_string());
        }
        if self.secret_store.secret_name.is_empty() {
            return Err("Secret store secret_name cannot be empty".to_string());
        }
        if self.secret_store.secret_version.is_empty() {
            return Err("Secret store secret_version cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            window: WindowConfig {
                timezone: chrono_tz::America::New_York,
                timezone_label: "Eastern".to_string(),
            },
            mobilize: MobilizeConfig {
                base_url: "https://api.mobilize.us/v1".to_string(),
                organization_id: 1471,
            },
            reddit: RedditConfig {
                auth_base_url: "https://www.reddit.com".to_string(),
                api_base_url: "https://oauth.reddit.com".to_string(),
                user_agent: "rust:yacu-events-bot:v0.1.0".to_string(),
                subreddit: "yacu".to_string(),
                rate_limit_seconds: 0,
            },
            secret_store: SecretStoreConfig {
                api_base_url: "https://secretmanager.googleapis.com".to_string(),
                metadata_base_url: "http://metadata.google.internal".to_string(),
                project_id: "commanding-way-273100".to_string(),
                secret_name: "reddit-bot-credentials".to_string(),
                secret_version: "latest".to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_default_window_is_new_york() {
        let settings = Settings::default();
        assert_eq!(settings.window.timezone, chrono_tz::America::New_York);
        assert_eq!(settings.window.timezone_label, "Eastern");
    }

    #[test]
    fn test_default_poster_is_unthrottled() {
        let settings = Settings::default();
        assert_eq!(settings.reddit.rate_limit_seconds, 0);
    }

    #[test]
    fn test_validation_catches_zero_port() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_catches_empty_subreddit() {
        let mut settings = Settings::default();
        settings.reddit.subreddit = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_catches_empty_secret_name() {
        let mut settings = Settings::default();
        settings.secret_store.secret_name = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_timezone_is_rejected_at_parse() {
        let result = serde_json::from_str::<WindowConfig>(
            r#"{"timezone": "Mars/Olympus_Mons", "timezone_label": "Martian"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let settings = Settings::load_from_path("/nonexistent").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.mobilize.base_url, "https://api.mobilize.us/v1");
    }
}
