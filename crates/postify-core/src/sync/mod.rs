//! Sync controller - runs user intents against the remote authority and
//! applies confirmed results to the stores.
//!
//! Every intent follows the same protocol: validate locally, issue exactly
//! one remote request, and only after the server confirms apply the matching
//! store mutation. A failure leaves the stores as they were and surfaces as
//! a [`SyncError`]. Nothing is applied speculatively, so there is nothing to
//! roll back.

use std::sync::Arc;

use crate::domain::{Credentials, NewAccount, Post, PostDraft};
use crate::error::{Intent, SyncError, ValidationError};
use crate::ports::{
    ACCESS_TOKEN_KEY, CredentialStore, REFRESH_TOKEN_KEY, RemoteAuthority, RemoteError,
    StorageError, TokenInspector,
};
use crate::store::{CollectionStore, SessionStore};

/// Number of posts requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Orchestrates remote calls and store updates.
///
/// Concurrent intents are not serialized: completions apply in the order the
/// server answers and the last one wins. In-flight requests are never
/// cancelled.
pub struct SyncController {
    remote: Arc<dyn RemoteAuthority>,
    storage: Arc<dyn CredentialStore>,
    inspector: Arc<dyn TokenInspector>,
    session: Arc<SessionStore>,
    collection: Arc<CollectionStore>,
}

impl SyncController {
    pub fn new(
        remote: Arc<dyn RemoteAuthority>,
        storage: Arc<dyn CredentialStore>,
        inspector: Arc<dyn TokenInspector>,
        session: Arc<SessionStore>,
        collection: Arc<CollectionStore>,
    ) -> Self {
        Self {
            remote,
            storage,
            inspector,
            session,
            collection,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn collection(&self) -> &Arc<CollectionStore> {
        &self.collection
    }

    /// Fetch page `page` and make it the current page.
    pub async fn load_page(&self, page: u32) -> Result<(), SyncError> {
        let intent = Intent::LoadPage;
        if page == 0 {
            return Err(self.invalid(intent, ValidationError::InvalidPage(page)));
        }

        let fetched = match self.remote.fetch_posts(page, PAGE_SIZE).await {
            Ok(fetched) => fetched,
            Err(e) => return Err(self.rejected(intent, e).await),
        };

        tracing::debug!(
            page,
            items = fetched.posts.len(),
            total_pages = fetched.total_pages,
            "Page loaded"
        );
        self.collection.replace_page(fetched.posts, fetched.total_pages);
        self.collection.set_current_page(page);
        Ok(())
    }

    /// Create a post and put it at the front of the current page.
    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, SyncError> {
        let intent = Intent::CreatePost;
        draft.validate().map_err(|e| self.invalid(intent, e))?;

        let created = match self.remote.create_post(&draft).await {
            Ok(created) => created,
            Err(e) => return Err(self.rejected(intent, e).await),
        };

        tracing::info!(id = %created.id, "Post created");
        self.collection.insert_front(created.clone());
        Ok(created)
    }

    /// Submit an edit of post `id` and replace it in place.
    pub async fn update_post(&self, id: &str, draft: PostDraft) -> Result<Post, SyncError> {
        let intent = Intent::UpdatePost;
        require_id(id)
            .and_then(|()| draft.validate())
            .map_err(|e| self.invalid(intent, e))?;

        let updated = match self.remote.update_post(id, &draft).await {
            Ok(updated) => updated,
            Err(e) => return Err(self.rejected(intent, e).await),
        };

        tracing::info!(id = %updated.id, "Post updated");
        self.collection.replace_by_id(updated.clone());
        Ok(updated)
    }

    /// Delete post `id` and drop it from the current page.
    pub async fn delete_post(&self, id: &str) -> Result<(), SyncError> {
        let intent = Intent::DeletePost;
        require_id(id).map_err(|e| self.invalid(intent, e))?;

        if let Err(e) = self.remote.delete_post(id).await {
            return Err(self.rejected(intent, e).await);
        }

        tracing::info!(id = %id, "Post deleted");
        self.collection.remove_by_id(id);
        Ok(())
    }

    /// Log in, persist both tokens and authenticate the session.
    ///
    /// Returns the authenticated user id. When the response carries no
    /// `user_id`, the subject of the access token is used instead.
    pub async fn login(&self, credentials: Credentials) -> Result<String, SyncError> {
        let intent = Intent::Login;
        credentials.validate().map_err(|e| self.invalid(intent, e))?;

        let tokens = self
            .remote
            .login(&credentials)
            .await
            .map_err(|e| self.failed(intent, e))?;

        let user_id = tokens
            .user_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| self.subject_of(&tokens.access_token))
            .ok_or_else(|| {
                tracing::warn!("Login response did not identify the user");
                SyncError::new(intent)
            })?;

        if let Err(e) = self.persist_tokens(&tokens.access_token, &tokens.refresh_token).await {
            return Err(self.failed(intent, e));
        }

        self.session
            .set_authenticated(&user_id)
            .map_err(|e| self.invalid(intent, e))?;
        Ok(user_id)
    }

    /// Register a new account. The session is not touched; the caller is
    /// expected to send the user to the login view.
    pub async fn signup(&self, account: NewAccount) -> Result<(), SyncError> {
        let intent = Intent::Signup;
        account.validate().map_err(|e| self.invalid(intent, e))?;

        self.remote
            .signup(&account)
            .await
            .map_err(|e| self.failed(intent, e))?;

        tracing::info!(username = %account.username, "Account created");
        Ok(())
    }

    /// End the session locally. No request is made.
    ///
    /// When the credentials cannot be removed, both stores stay as they were.
    pub async fn logout(&self) -> Result<(), SyncError> {
        self.session
            .clear()
            .await
            .map_err(|e| self.failed(Intent::Logout, e))?;
        self.collection.reset();
        Ok(())
    }

    /// Exchange the persisted refresh token for a new access token.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        let intent = Intent::Refresh;

        let Some(refresh_token) = self.storage.get(REFRESH_TOKEN_KEY).await else {
            return Err(self.rejected(intent, RemoteError::Unauthenticated).await);
        };

        let access_token = match self.remote.refresh(&refresh_token).await {
            Ok(access_token) => access_token,
            Err(e) => return Err(self.rejected(intent, e).await),
        };

        self.storage
            .set(ACCESS_TOKEN_KEY, &access_token)
            .await
            .map_err(|e| self.failed(intent, e))?;

        tracing::debug!("Access token refreshed");
        Ok(())
    }

    async fn persist_tokens(&self, access: &str, refresh: &str) -> Result<(), StorageError> {
        let written = match self.storage.set(ACCESS_TOKEN_KEY, access).await {
            Ok(()) => self.storage.set(REFRESH_TOKEN_KEY, refresh).await,
            Err(e) => Err(e),
        };

        if written.is_err() {
            // Leave no half-written credential pair behind.
            for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
                if let Err(e) = self.storage.remove(key).await {
                    tracing::warn!(key, error = %e, "Failed to remove partially stored credential");
                }
            }
        }
        written
    }

    fn subject_of(&self, access_token: &str) -> Option<String> {
        self.inspector
            .inspect(access_token)
            .ok()
            .and_then(|claims| claims.subject)
            .filter(|subject| !subject.trim().is_empty())
    }

    fn invalid(&self, intent: Intent, error: ValidationError) -> SyncError {
        tracing::info!(%intent, error = %error, "Rejected before sending");
        SyncError::new(intent)
    }

    fn failed(&self, intent: Intent, error: impl std::fmt::Display) -> SyncError {
        tracing::warn!(%intent, error = %error, "Operation failed");
        SyncError::new(intent)
    }

    /// Failure of a call made on behalf of an authenticated session. An
    /// unauthenticated rejection ends the session before reporting.
    async fn rejected(&self, intent: Intent, error: RemoteError) -> SyncError {
        if error.is_unauthenticated() {
            tracing::info!(%intent, "Credentials rejected, ending session");
            if let Err(e) = self.session.clear().await {
                tracing::warn!(error = %e, "Failed to remove credentials");
                // The server no longer honors them, so forget them anyway.
                self.session.forget();
            }
            self.collection.reset();
        }
        self.failed(intent, error)
    }
}

fn require_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::Empty { field: "id" });
    }
    Ok(())
}
