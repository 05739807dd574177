//! Session store - authentication flag, identity and credential lifecycle.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{Post, Session};
use crate::error::ValidationError;
use crate::ports::{
    ACCESS_TOKEN_KEY, AuthError, CredentialStore, REFRESH_TOKEN_KEY, StorageError, TokenInspector,
};

/// Holds the current [`Session`] and owns clearing of persisted credentials.
///
/// Writing credentials is the caller's job (the sync controller persists
/// tokens before calling [`SessionStore::set_authenticated`]).
pub struct SessionStore {
    state: RwLock<Session>,
    storage: Arc<dyn CredentialStore>,
    inspector: Arc<dyn TokenInspector>,
}

impl SessionStore {
    /// Create an unauthenticated store. Call [`SessionStore::initialize`] to
    /// pick up a persisted credential.
    pub fn new(storage: Arc<dyn CredentialStore>, inspector: Arc<dyn TokenInspector>) -> Self {
        Self {
            state: RwLock::new(Session::anonymous()),
            storage,
            inspector,
        }
    }

    /// Restore the authentication flag from durable storage.
    ///
    /// The identity is never restored: `user_id` stays `None` until the next
    /// login. An access credential that decodes as expired counts as absent
    /// and is removed together with its refresh credential.
    pub async fn initialize(&self) -> Session {
        let token = self
            .storage
            .get(ACCESS_TOKEN_KEY)
            .await
            .filter(|token| !token.is_empty());

        let restored = match token {
            None => false,
            Some(token) => match self.inspector.inspect(&token) {
                Ok(claims) => {
                    tracing::debug!(expires_at = ?claims.expires_at, "Persisted access token is live");
                    true
                }
                // Not a decodable token; treat it as an opaque credential.
                Err(AuthError::InvalidToken(_)) => true,
                Err(AuthError::TokenExpired) => {
                    tracing::info!("Persisted access token has expired");
                    if let Err(e) = self.remove_credentials().await {
                        tracing::warn!(error = %e, "Failed to remove expired credentials");
                    }
                    false
                }
            },
        };

        let session = if restored {
            Session::restored()
        } else {
            Session::anonymous()
        };
        *self.write() = session.clone();

        tracing::debug!(authenticated = restored, "Session initialized");
        session
    }

    /// Mark the session as authenticated for `user_id`.
    pub fn set_authenticated(&self, user_id: &str) -> Result<(), ValidationError> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::Empty { field: "user_id" });
        }

        *self.write() = Session::authenticated(user_id);
        tracing::info!(user_id = %user_id, "Session authenticated");
        Ok(())
    }

    /// End the session and remove both credentials from durable storage.
    ///
    /// The in-memory state is reset only once both removals succeed, so a
    /// failed clear leaves the session matching what is still stored. Safe
    /// to call on an already cleared session.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.remove_credentials().await?;
        self.forget();
        Ok(())
    }

    /// Reset the in-memory session without touching durable storage.
    pub fn forget(&self) {
        let was_authenticated = {
            let mut state = self.write();
            let was = state.is_authenticated;
            *state = Session::anonymous();
            was
        };

        if was_authenticated {
            tracing::info!("Session cleared");
        }
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated
    }

    pub fn user_id(&self) -> Option<String> {
        self.read().user_id.clone()
    }

    /// Whether the current user owns `post`. False while the identity is
    /// unknown.
    pub fn owns(&self, post: &Post) -> bool {
        self.read()
            .user_id
            .as_deref()
            .is_some_and(|user_id| post.is_owned_by(user_id))
    }

    async fn remove_credentials(&self) -> Result<(), StorageError> {
        // Attempt both removals even if the first one fails.
        let access = self.storage.remove(ACCESS_TOKEN_KEY).await;
        let refresh = self.storage.remove(REFRESH_TOKEN_KEY).await;
        access.and(refresh)
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
