//! HTTP client for the Reddit API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};
use url::Url;

use crate::auth::{request_token, AccessToken};
use crate::error::{FetchError, Result};
use crate::listing::{CommentData, Listing, Section, SubmissionData};
use crate::source::ActivitySource;
use crate::types::{ContentItem, RedditConfig, MAX_PAGE_SIZE};

/// Reddit API client.
///
/// Authenticates with the password grant and reads a user's `new`
/// comment and submission listings, following `after` cursors until the
/// requested limit is reached.
pub struct RedditClient {
    config: RedditConfig,
    client: Client,
    token_url: Url,
    api_base: Url,
}

impl RedditClient {
    /// Create a new client. Fails on unparsable base URLs or if the HTTP
    /// client cannot be built.
    pub fn new(config: RedditConfig) -> Result<Self> {
        let token_url = Url::parse(&config.auth_base_url)
            .and_then(|base| join_path(base, &["api", "v1", "access_token"]))
            .map_err(|e| FetchError::Config(format!("auth URL: {}", e)))?;

        let api_base = Url::parse(&config.api_base_url)
            .map_err(|e| FetchError::Config(format!("API URL: {}", e)))?;
        if api_base.cannot_be_a_base() {
            return Err(FetchError::Config(format!(
                "API URL cannot be a base: {}",
                config.api_base_url
            )));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            config,
            client,
            token_url,
            api_base,
        })
    }

    /// Authenticate and fetch up to `limit` comments, then up to `limit`
    /// submissions, newest first within each group.
    #[instrument(skip(self))]
    pub async fn fetch_activity(&self, username: &str, limit: usize) -> Result<Vec<ContentItem>> {
        let token = request_token(&self.client, &self.token_url, &self.config).await?;

        info!("Fetching Reddit activity for u/{}", username);

        let comments: Vec<CommentData> = self
            .fetch_listing(&token, username, Section::Comments, limit)
            .await?;
        let submissions: Vec<SubmissionData> = self
            .fetch_listing(&token, username, Section::Submitted, limit)
            .await?;

        let mut items = Vec::with_capacity(comments.len() + submissions.len());
        items.extend(comments.into_iter().map(ContentItem::from));
        items.extend(submissions.into_iter().map(ContentItem::from));

        info!(total = items.len(), "Found {} total items", items.len());
        Ok(items)
    }

    /// Read one user listing section page by page.
    async fn fetch_listing<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        username: &str,
        section: Section,
        limit: usize,
    ) -> Result<Vec<T>> {
        let mut collected: Vec<T> = Vec::new();
        let mut after: Option<String> = None;

        while collected.len() < limit {
            let page_size = (limit - collected.len()).min(MAX_PAGE_SIZE);
            let url = self.listing_url(username, section, page_size, after.as_deref())?;

            let response = self
                .client
                .get(url)
                .bearer_auth(&token.value)
                .send()
                .await?;
            let listing: Listing<T> = handle_response(response, username).await?;

            let page_len = listing.data.children.len();
            debug!(
                section = section.path(),
                page_len,
                after = ?listing.data.after,
                "Fetched listing page"
            );

            collected.extend(
                listing
                    .data
                    .children
                    .into_iter()
                    .filter(|thing| thing.kind == section.kind())
                    .map(|thing| thing.data),
            );

            match listing.data.after {
                Some(next) if page_len > 0 => after = Some(next),
                _ => break,
            }
        }

        collected.truncate(limit);
        Ok(collected)
    }

    fn listing_url(
        &self,
        username: &str,
        section: Section,
        page_size: usize,
        after: Option<&str>,
    ) -> Result<Url> {
        let mut url = join_path(self.api_base.clone(), &["user", username, section.path()])
            .map_err(|e| FetchError::Config(format!("API URL: {}", e)))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("sort", "new")
                .append_pair("limit", &page_size.to_string())
                .append_pair("raw_json", "1");
            if let Some(after) = after {
                query.append_pair("after", after);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl ActivitySource for RedditClient {
    fn name(&self) -> &str {
        "reddit"
    }

    async fn fetch_activity(&self, username: &str, limit: usize) -> Result<Vec<ContentItem>> {
        RedditClient::fetch_activity(self, username, limit).await
    }
}

/// Append percent-encoded path segments to a base URL.
fn join_path(mut base: Url, segments: &[&str]) -> std::result::Result<Url, url::ParseError> {
    base.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithoutBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(base)
}

/// Map listing response status to a typed error, or decode the body.
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
    username: &str,
) -> Result<T> {
    let status = response.status();

    match status {
        StatusCode::UNAUTHORIZED => {
            return Err(FetchError::Auth("access token rejected".to_string()));
        }
        StatusCode::FORBIDDEN => return Err(FetchError::Forbidden(username.to_string())),
        StatusCode::NOT_FOUND => return Err(FetchError::NotFound(username.to_string())),
        StatusCode::TOO_MANY_REQUESTS => return Err(FetchError::RateLimited),
        _ => {}
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> RedditConfig {
        RedditConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            user_agent: "persona-test/0.1 by tester".to_string(),
            username: "bot".to_string(),
            password: "hunter2".to_string(),
            auth_base_url: server.uri(),
            api_base_url: server.uri(),
            timeout_ms: 5_000,
        }
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "token_type": "bearer",
                "expires_in": 3600,
                "scope": "*"
            })))
            .mount(server)
            .await;
    }

    fn comment(n: usize) -> serde_json::Value {
        serde_json::json!({
            "kind": "t1",
            "data": {
                "body": format!("comment {}", n),
                "permalink": format!("/r/test/comments/p/t/c{}/", n)
            }
        })
    }

    fn listing(children: Vec<serde_json::Value>, after: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "kind": "Listing",
            "data": { "after": after, "children": children }
        })
    }

    #[tokio::test]
    async fn test_fetch_activity_orders_comments_before_posts() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/user/alice/comments"))
            .and(header("authorization", "Bearer tok"))
            .and(query_param("sort", "new"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(listing(vec![comment(1), comment(2)], None)),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/alice/submitted"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(
                vec![serde_json::json!({
                    "kind": "t3",
                    "data": {
                        "title": "My first post",
                        "selftext": "Hello there",
                        "permalink": "/r/test/comments/p1/my_first_post/"
                    }
                })],
                None,
            )))
            .mount(&server)
            .await;

        let client = RedditClient::new(test_config(&server)).unwrap();
        let items = client.fetch_activity("alice", 100).await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].text, "comment 1");
        assert_eq!(items[1].text, "comment 2");
        assert_eq!(items[2].text, "Title: My first post\n\nHello there");
        assert_eq!(
            items[2].permalink,
            "https://www.reddit.com/r/test/comments/p1/my_first_post/"
        );
    }

    #[tokio::test]
    async fn test_pagination_follows_after_until_limit() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/user/alice/comments"))
            .and(query_param("after", "t1_page2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(
                vec![comment(3), comment(4)],
                Some("t1_page3"),
            )))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/alice/comments"))
            .and(query_param("limit", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(
                vec![comment(1), comment(2)],
                Some("t1_page2"),
            )))
            .with_priority(2)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/alice/submitted"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(vec![], None)))
            .mount(&server)
            .await;

        let client = RedditClient::new(test_config(&server)).unwrap();
        let items = client.fetch_activity("alice", 3).await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[2].text, "comment 3");
    }

    #[tokio::test]
    async fn test_empty_activity_is_ok() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(vec![], None)))
            .mount(&server)
            .await;

        let client = RedditClient::new(test_config(&server)).unwrap();
        let items = client.fetch_activity("quiet_user", 100).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/user/ghost/comments"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message": "Not Found", "error": 404}"#))
            .mount(&server)
            .await;

        let client = RedditClient::new(test_config(&server)).unwrap();
        let err = client.fetch_activity("ghost", 100).await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref u) if u == "ghost"));
    }

    #[tokio::test]
    async fn test_suspended_user_is_forbidden() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = RedditClient::new(test_config(&server)).unwrap();
        let err = client.fetch_activity("banned", 100).await.unwrap_err();
        assert!(matches!(err, FetchError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_listing_rate_limit() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/user/alice/comments"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "60"))
            .mount(&server)
            .await;

        let client = RedditClient::new(test_config(&server)).unwrap();
        let err = client.fetch_activity("alice", 10).await.unwrap_err();
        assert!(matches!(err, FetchError::RateLimited));
    }

    #[tokio::test]
    async fn test_rejected_token_on_listing_is_auth_error() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/user/alice/comments"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message": "Unauthorized", "error": 401}"#))
            .mount(&server)
            .await;

        let client = RedditClient::new(test_config(&server)).unwrap();
        let err = client.fetch_activity("alice", 10).await.unwrap_err();
        assert!(matches!(err, FetchError::Auth(_)));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = RedditClient::new(test_config(&server)).unwrap();
        let err = client.fetch_activity("alice", 10).await.unwrap_err();
        assert!(matches!(err, FetchError::Api { status: 503, ref message } if message == "upstream down"));
    }

    #[tokio::test]
    async fn test_bad_credentials_surface_as_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "error": "invalid_grant" })),
            )
            .mount(&server)
            .await;

        let client = RedditClient::new(test_config(&server)).unwrap();
        let err = client.fetch_activity("alice", 10).await.unwrap_err();
        assert!(matches!(err, FetchError::Auth(_)));
    }

    #[tokio::test]
    async fn test_malformed_listing_is_parse_error() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = RedditClient::new(test_config(&server)).unwrap();
        let err = client.fetch_activity("alice", 10).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_listing_url_encodes_username() {
        let config = RedditConfig {
            api_base_url: "https://oauth.reddit.com".to_string(),
            ..Default::default()
        };
        let client = RedditClient::new(config).unwrap();
        let url = client
            .listing_url("we ird", Section::Submitted, 25, Some("t3_x"))
            .unwrap();

        assert_eq!(url.path(), "/user/we%20ird/submitted");
        assert_eq!(
            url.query(),
            Some("sort=new&limit=25&raw_json=1&after=t3_x")
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let config = RedditConfig {
            api_base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            RedditClient::new(config),
            Err(FetchError::Config(_))
        ));
    }
}
