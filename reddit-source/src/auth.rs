//! OAuth2 password-grant authentication.
//!
//! Reddit "script" applications exchange the account credentials for a
//! bearer token at `/api/v1/access_token`. The endpoint answers some
//! credential failures with HTTP 200 and an `error` field, so both the
//! status and the body are checked.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{FetchError, Result};
use crate::types::RedditConfig;

/// Bearer token returned by the token endpoint.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    /// Lifetime in seconds, if reported
    pub expires_in: Option<u64>,
    /// Granted scope, `*` for script apps
    pub scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    scope: Option<String>,
    error: Option<String>,
}

/// Request a bearer token using the password grant.
#[instrument(skip_all, fields(account = %config.username))]
pub async fn request_token(client: &Client, token_url: &Url, config: &RedditConfig) -> Result<AccessToken> {
    let form = [
        ("grant_type", "password"),
        ("username", config.username.as_str()),
        ("password", config.password.as_str()),
    ];

    let response = client
        .post(token_url.clone())
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(FetchError::Auth(format!("HTTP {}: {}", status, body)));
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimited);
    }
    if !status.is_success() {
        return Err(FetchError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let token: TokenResponse = serde_json::from_str(&body)?;

    if let Some(error) = token.error {
        return Err(FetchError::Auth(error));
    }

    let value = token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| FetchError::Auth("token response carried no access_token".to_string()))?;

    debug!(scope = ?token.scope, expires_in = ?token.expires_in, "Obtained Reddit access token");

    Ok(AccessToken {
        value,
        expires_in: token.expires_in,
        scope: token.scope,
    })
}
