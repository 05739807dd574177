//! Test doubles for the ports.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::{Credentials, IssuedTokens, NewAccount, Post, PostDraft, PostsPage};
use crate::ports::{
    AuthError, CredentialStore, RemoteAuthority, RemoteError, StorageError, TokenClaims,
    TokenInspector,
};

#[derive(Default)]
pub(crate) struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    fail_removes: AtomicBool,
}

impl MemoryStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(entries: &[(&str, &str)]) -> Self {
        let values = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            values: Mutex::new(values),
            fail_removes: AtomicBool::new(false),
        }
    }

    /// Make every following `remove` fail with an IO error.
    pub(crate) fn fail_removes(&self) {
        self.fail_removes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryStorage {
    async fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("disk unavailable").into());
        }
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Tokens starting with `expired` are expired, `jwt:<sub>` decodes to the
/// subject `<sub>`, anything else is opaque.
pub(crate) struct StubInspector;

impl TokenInspector for StubInspector {
    fn inspect(&self, token: &str) -> Result<TokenClaims, AuthError> {
        if token.starts_with("expired") {
            return Err(AuthError::TokenExpired);
        }
        match token.strip_prefix("jwt:") {
            Some(subject) => Ok(TokenClaims {
                subject: Some(subject.to_string()),
                expires_at: None,
            }),
            None => Err(AuthError::InvalidToken("not a jwt".to_string())),
        }
    }
}

/// Scripted remote authority that records every call it receives.
pub(crate) struct FakeRemote {
    calls: Mutex<Vec<&'static str>>,
    failure: Mutex<Option<RemoteError>>,
    page: Mutex<PostsPage>,
    tokens: Mutex<IssuedTokens>,
    owner_id: String,
}

impl FakeRemote {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            page: Mutex::new(PostsPage {
                posts: Vec::new(),
                total_pages: 1,
            }),
            tokens: Mutex::new(IssuedTokens {
                access_token: "x".to_string(),
                refresh_token: "y".to_string(),
                user_id: Some("u1".to_string()),
            }),
            owner_id: "u1".to_string(),
        }
    }

    pub(crate) fn with_page(self, posts: Vec<Post>, total_pages: u32) -> Self {
        *self.page.lock().unwrap() = PostsPage { posts, total_pages };
        self
    }

    pub(crate) fn with_tokens(self, tokens: IssuedTokens) -> Self {
        *self.tokens.lock().unwrap() = tokens;
        self
    }

    /// Make every following call fail with `error`.
    pub(crate) fn fail_with(&self, error: RemoteError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteAuthority for FakeRemote {
    async fn signup(&self, _account: &NewAccount) -> Result<(), RemoteError> {
        self.record("signup")
    }

    async fn login(&self, _credentials: &Credentials) -> Result<IssuedTokens, RemoteError> {
        self.record("login")?;
        Ok(self.tokens.lock().unwrap().clone())
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<String, RemoteError> {
        self.record("refresh")?;
        Ok("refreshed".to_string())
    }

    async fn fetch_posts(&self, _page: u32, _limit: u32) -> Result<PostsPage, RemoteError> {
        self.record("fetch_posts")?;
        Ok(self.page.lock().unwrap().clone())
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, RemoteError> {
        self.record("create_post")?;
        let id = format!("new-{}", self.calls.lock().unwrap().len());
        Ok(Post::new(id, &draft.title, &draft.content, &self.owner_id))
    }

    async fn update_post(&self, id: &str, draft: &PostDraft) -> Result<Post, RemoteError> {
        self.record("update_post")?;
        Ok(Post::new(id, &draft.title, &draft.content, &self.owner_id))
    }

    async fn delete_post(&self, _id: &str) -> Result<(), RemoteError> {
        self.record("delete_post")
    }
}
