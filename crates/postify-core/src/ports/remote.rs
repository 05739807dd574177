//! Remote authority port - the backend that owns accounts and posts.

use async_trait::async_trait;

use crate::domain::{Credentials, IssuedTokens, NewAccount, Post, PostDraft, PostsPage};

/// The REST backend, treated as the single source of truth.
///
/// Every method issues exactly one request. Implementations attach the
/// persisted access credential to requests that need it.
#[async_trait]
pub trait RemoteAuthority: Send + Sync {
    /// Register a new account.
    async fn signup(&self, account: &NewAccount) -> Result<(), RemoteError>;

    /// Exchange credentials for tokens.
    async fn login(&self, credentials: &Credentials) -> Result<IssuedTokens, RemoteError>;

    /// Exchange a refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<String, RemoteError>;

    /// Fetch one page of posts.
    async fn fetch_posts(&self, page: u32, limit: u32) -> Result<PostsPage, RemoteError>;

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, RemoteError>;

    async fn update_post(&self, id: &str, draft: &PostDraft) -> Result<Post, RemoteError>;

    async fn delete_post(&self, id: &str) -> Result<(), RemoteError>;
}

/// Remote call failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Not allowed to modify this resource")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Request could not complete: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Whether the server no longer accepts the current credentials.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, RemoteError::Unauthenticated)
    }
}
