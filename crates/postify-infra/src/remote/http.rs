//! REST implementation of the remote authority.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use postify_core::domain::{Credentials, IssuedTokens, NewAccount, Post, PostDraft, PostsPage};
use postify_core::ports::{ACCESS_TOKEN_KEY, CredentialStore, RemoteAuthority, RemoteError};
use postify_shared::ErrorBody;
use postify_shared::dto::{
    LoginRequest, LoginResponse, PostDto, PostRequest, PostsPageResponse, RefreshResponse,
    SignupRequest,
};

/// Header carrying a per-request correlation id.
pub static REQUEST_ID_HEADER: &str = "X-Request-ID";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Remote authority connection configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API root (e.g., http://127.0.0.1:5000)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RemoteConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("POSTIFY_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("POSTIFY_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }
}

/// Errors raised while building the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum RemoteConfigError {
    #[error("Invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// HTTP client for the Postify REST API.
///
/// Requests to `/posts` carry the persisted access token as a Bearer
/// credential. Every request gets a fresh `X-Request-ID`.
pub struct HttpRemoteAuthority {
    base_url: Url,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpRemoteAuthority {
    pub fn new(
        config: RemoteConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, RemoteConfigError> {
        let raw = config.base_url.trim();
        let base_url = Url::parse(raw).map_err(|e| RemoteConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(RemoteConfigError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteConfigError::Client(e.to_string()))?;

        tracing::debug!(base_url = %base_url, "Remote authority configured");

        Ok(Self {
            base_url,
            http,
            credentials,
        })
    }

    /// Build an endpoint URL below the base path, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, which `new` rejects.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http.request(method, self.endpoint(segments))
    }

    /// Attach the persisted access token, if there is one.
    async fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.get(ACCESS_TOKEN_KEY).await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
        let request_id = Uuid::new_v4().to_string();

        let response = builder
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "Request failed to complete");
                RemoteError::Transport(e.to_string())
            })?;

        let status = response.status();
        tracing::debug!(
            request_id = %request_id,
            url = %response.url(),
            status = status.as_u16(),
            "Response received"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = ErrorBody::describe(&body);
        tracing::debug!(request_id = %request_id, detail = %message, "Request rejected");

        Err(match status {
            StatusCode::UNAUTHORIZED => RemoteError::Unauthenticated,
            StatusCode::FORBIDDEN => RemoteError::Forbidden,
            StatusCode::NOT_FOUND => RemoteError::NotFound,
            _ => RemoteError::Rejected {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

fn into_post(dto: PostDto) -> Post {
    Post {
        id: dto.id,
        title: dto.title,
        content: dto.content,
        owner_id: dto.user_id,
    }
}

fn post_request(draft: &PostDraft) -> PostRequest {
    PostRequest {
        title: draft.title.clone(),
        content: draft.content.clone(),
    }
}

#[async_trait]
impl RemoteAuthority for HttpRemoteAuthority {
    async fn signup(&self, account: &NewAccount) -> Result<(), RemoteError> {
        let body = SignupRequest {
            username: account.username.clone(),
            email: account.email.clone(),
            password: account.password.clone(),
        };

        self.send(self.request(Method::POST, &["auth", "signup"]).json(&body))
            .await?;
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<IssuedTokens, RemoteError> {
        let body = LoginRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        };

        let response = self
            .send(self.request(Method::POST, &["auth", "login"]).json(&body))
            .await?;
        let login: LoginResponse = Self::decode(response).await?;

        Ok(IssuedTokens {
            access_token: login.access_token,
            refresh_token: login.refresh_token,
            user_id: login.user_id,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, RemoteError> {
        let builder = self
            .request(Method::POST, &["auth", "refresh"])
            .bearer_auth(refresh_token);

        let response = self.send(builder).await?;
        let refreshed: RefreshResponse = Self::decode(response).await?;
        Ok(refreshed.access_token)
    }

    async fn fetch_posts(&self, page: u32, limit: u32) -> Result<PostsPage, RemoteError> {
        let builder = self
            .request(Method::GET, &["posts"])
            .query(&[("page", page), ("limit", limit)]);

        let response = self.send(self.authorized(builder).await).await?;
        let page: PostsPageResponse = Self::decode(response).await?;

        Ok(PostsPage {
            posts: page.posts.into_iter().map(into_post).collect(),
            total_pages: page.total_pages,
        })
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, RemoteError> {
        let builder = self
            .request(Method::POST, &["posts"])
            .json(&post_request(draft));

        let response = self.send(self.authorized(builder).await).await?;
        Self::decode::<PostDto>(response).await.map(into_post)
    }

    async fn update_post(&self, id: &str, draft: &PostDraft) -> Result<Post, RemoteError> {
        let builder = self
            .request(Method::PUT, &["posts", id])
            .json(&post_request(draft));

        let response = self.send(self.authorized(builder).await).await?;
        Self::decode::<PostDto>(response).await.map(into_post)
    }

    async fn delete_post(&self, id: &str) -> Result<(), RemoteError> {
        let builder = self.request(Method::DELETE, &["posts", id]);

        self.send(self.authorized(builder).await).await?;
        Ok(())
    }
}
