//! Common types for the reddit-source crate.

use serde::{Deserialize, Serialize};

/// Public site origin used to turn API-relative permalinks into absolute URLs.
pub const REDDIT_ORIGIN: &str = "https://www.reddit.com";

/// Default OAuth token host.
pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com";

/// Default authenticated API host.
pub const DEFAULT_API_URL: &str = "https://oauth.reddit.com";

/// Largest page size the listing endpoints accept.
pub const MAX_PAGE_SIZE: usize = 100;

/// Kind of fetched activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Comment,
    Post,
}

/// One comment or submission, normalized for prompt building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Comment or post
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// Comment body, or `Title: <title>\n\n<selftext>` for posts
    pub text: String,
    /// Absolute URL of the item
    pub permalink: String,
}

impl ContentItem {
    /// Create a comment record from an API-relative permalink.
    pub fn comment(body: impl Into<String>, permalink: &str) -> Self {
        Self {
            kind: ContentKind::Comment,
            text: body.into(),
            permalink: absolute_permalink(permalink),
        }
    }

    /// Create a post record. `selftext` is empty for link posts.
    pub fn post(title: &str, selftext: &str, permalink: &str) -> Self {
        Self {
            kind: ContentKind::Post,
            text: format!("Title: {}\n\n{}", title, selftext),
            permalink: absolute_permalink(permalink),
        }
    }
}

/// Prefix a relative permalink with the site origin. Absolute URLs pass through.
pub fn absolute_permalink(permalink: &str) -> String {
    if permalink.starts_with("http://") || permalink.starts_with("https://") {
        permalink.to_string()
    } else {
        format!("{}{}", REDDIT_ORIGIN, permalink)
    }
}

/// Reddit API client configuration.
#[derive(Debug, Clone)]
pub struct RedditConfig {
    /// OAuth application client id
    pub client_id: String,
    /// OAuth application client secret
    pub client_secret: String,
    /// User-Agent sent with every request (Reddit rejects generic agents)
    pub user_agent: String,
    /// Account username for the password grant
    pub username: String,
    /// Account password for the password grant
    pub password: String,
    /// Base URL of the token endpoint host
    pub auth_base_url: String,
    /// Base URL of the authenticated API host
    pub api_base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_agent: format!("reddit-persona/{}", env!("CARGO_PKG_VERSION")),
            username: String::new(),
            password: String::new(),
            auth_base_url: DEFAULT_AUTH_URL.to_string(),
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: 60_000,
        }
    }
}
