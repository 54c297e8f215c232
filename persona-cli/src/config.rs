//! Configuration for the persona CLI
//!
//! CLI arguments and environment variable handling using clap. Credentials
//! are optional at parse time so `--help` always works; `validate()` checks
//! them before any network call.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use persona_agent::backend::openai::OPENAI_BASE_URL;
use reddit_source::{RedditConfig, DEFAULT_API_URL, DEFAULT_AUTH_URL};

use crate::pipeline::DEFAULT_FETCH_LIMIT;

/// Generate a Reddit user persona from a profile URL.
#[derive(Parser, Debug, Clone)]
#[command(name = "reddit-persona")]
#[command(about = "Generate a Reddit user persona from a profile URL")]
pub struct Args {
    /// Reddit user profile URL (e.g., https://www.reddit.com/user/username)
    pub url: String,

    /// Reddit OAuth application client id
    #[arg(long, env = "REDDIT_CLIENT_ID", hide_env_values = true)]
    pub reddit_client_id: Option<String>,

    /// Reddit OAuth application client secret
    #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
    pub reddit_client_secret: Option<String>,

    /// User-Agent sent to Reddit (e.g., "persona-bot/0.1 by u/yourname")
    #[arg(long, env = "REDDIT_USER_AGENT")]
    pub reddit_user_agent: Option<String>,

    /// Reddit account username for the password grant
    #[arg(long, env = "REDDIT_USERNAME")]
    pub reddit_username: Option<String>,

    /// Reddit account password for the password grant
    #[arg(long, env = "REDDIT_PASSWORD", hide_env_values = true)]
    pub reddit_password: Option<String>,

    /// Reddit OAuth token host
    #[arg(long, env = "REDDIT_AUTH_URL", default_value = DEFAULT_AUTH_URL)]
    pub reddit_auth_url: String,

    /// Reddit authenticated API host
    #[arg(long, env = "REDDIT_API_URL", default_value = DEFAULT_API_URL)]
    pub reddit_api_url: String,

    /// API key for the chat completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = OPENAI_BASE_URL)]
    pub openai_base_url: String,

    /// Chat model used for persona generation
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4-turbo-preview")]
    pub model: String,

    /// Maximum comments and maximum posts to fetch (each)
    #[arg(long, env = "FETCH_LIMIT", default_value_t = DEFAULT_FETCH_LIMIT)]
    pub fetch_limit: usize,

    /// Directory persona files are written to
    #[arg(long, env = "OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "60000")]
    pub request_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Configuration problems detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is absent or blank
    #[error("{0} is required")]
    Missing(&'static str),

    /// Fetch limit must be positive
    #[error("FETCH_LIMIT must be greater than zero")]
    InvalidFetchLimit,

    /// Timeout must be positive
    #[error("REQUEST_TIMEOUT_MS must be greater than zero")]
    InvalidTimeout,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        require(&self.reddit_client_id, "REDDIT_CLIENT_ID")?;
        require(&self.reddit_client_secret, "REDDIT_CLIENT_SECRET")?;
        require(&self.reddit_user_agent, "REDDIT_USER_AGENT")?;
        require(&self.reddit_username, "REDDIT_USERNAME")?;
        require(&self.reddit_password, "REDDIT_PASSWORD")?;
        require(&self.openai_api_key, "OPENAI_API_KEY")?;

        if self.fetch_limit == 0 {
            return Err(ConfigError::InvalidFetchLimit);
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }

    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Build the Reddit client configuration
    pub fn reddit_config(&self) -> RedditConfig {
        let defaults = RedditConfig::default();
        RedditConfig {
            client_id: self.reddit_client_id.clone().unwrap_or_default(),
            client_secret: self.reddit_client_secret.clone().unwrap_or_default(),
            user_agent: self
                .reddit_user_agent
                .clone()
                .unwrap_or(defaults.user_agent),
            username: self.reddit_username.clone().unwrap_or_default(),
            password: self.reddit_password.clone().unwrap_or_default(),
            auth_base_url: self.reddit_auth_url.clone(),
            api_base_url: self.reddit_api_url.clone(),
            timeout_ms: self.request_timeout_ms,
        }
    }

    /// Log filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> String {
        format!(
            "persona_cli={level},reddit_source={level},persona_agent={level},warn",
            level = self.log_level
        )
    }
}

fn require(value: &Option<String>, name: &'static str) -> Result<(), ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_args() -> Vec<&'static str> {
        vec![
            "reddit-persona",
            "https://www.reddit.com/user/alice/",
            "--reddit-client-id",
            "cid",
            "--reddit-client-secret",
            "csecret",
            "--reddit-user-agent",
            "persona-test/0.1",
            "--reddit-username",
            "bot",
            "--reddit-password",
            "pw",
            "--openai-api-key",
            "sk-test",
        ]
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(full_args()).unwrap();

        assert_eq!(args.url, "https://www.reddit.com/user/alice/");
        assert_eq!(args.fetch_limit, 100);
        assert_eq!(args.output_dir, PathBuf::from("output"));
        assert_eq!(args.reddit_auth_url, "https://www.reddit.com");
        assert_eq!(args.reddit_api_url, "https://oauth.reddit.com");
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_reddit_config_mapping() {
        let args = Args::try_parse_from(full_args()).unwrap();
        let config = args.reddit_config();

        assert_eq!(config.client_id, "cid");
        assert_eq!(config.client_secret, "csecret");
        assert_eq!(config.user_agent, "persona-test/0.1");
        assert_eq!(config.username, "bot");
        assert_eq!(config.password, "pw");
        assert_eq!(config.timeout_ms, 60_000);
    }

    #[test]
    fn test_blank_credential_is_rejected() {
        let mut args = Args::try_parse_from(full_args()).unwrap();
        args.reddit_password = Some("   ".to_string());

        assert!(matches!(
            args.validate(),
            Err(ConfigError::Missing("REDDIT_PASSWORD"))
        ));
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let mut args = Args::try_parse_from(full_args()).unwrap();
        args.openai_api_key = None;

        let err = args.validate().unwrap_err();
        assert_eq!(err.to_string(), "OPENAI_API_KEY is required");
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let mut args = Args::try_parse_from(full_args()).unwrap();
        args.fetch_limit = 0;

        assert!(matches!(args.validate(), Err(ConfigError::InvalidFetchLimit)));
    }

    #[test]
    fn test_url_is_required() {
        assert!(Args::try_parse_from(["reddit-persona"]).is_err());
    }
}
