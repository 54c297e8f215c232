//! Error types for Reddit fetching.

use thiserror::Error;

/// Reasons a Reddit fetch can fail.
///
/// An empty activity list is not an error; it comes back as `Ok(vec![])`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Client configuration is unusable (bad base URL, missing credentials)
    #[error("Invalid Reddit configuration: {0}")]
    Config(String),

    /// Credentials were rejected by the token endpoint
    #[error("Reddit authentication failed: {0}")]
    Auth(String),

    /// The requested account does not exist
    #[error("Reddit user not found: {0}")]
    NotFound(String),

    /// The account is suspended or its activity is hidden
    #[error("Access to Reddit user '{0}' is forbidden (suspended or private)")]
    Forbidden(String),

    /// Rate limited by the API
    #[error("Rate limited by Reddit API")]
    RateLimited,

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other non-success response
    #[error("Reddit API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to parse Reddit response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for Reddit operations
pub type Result<T> = std::result::Result<T, FetchError>;
