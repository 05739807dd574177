//! Application state - the stores and the controller that drives them.

use std::sync::Arc;

use postify_core::ports::{CredentialStore, RemoteAuthority, TokenInspector};
use postify_core::{CollectionStore, SessionStore, SyncController};
use postify_infra::{
    FileCredentialStore, HttpRemoteAuthority, JwtTokenInspector, RemoteConfigError,
};

use crate::config::AppConfig;

/// Everything a command needs.
pub struct AppState {
    pub session: Arc<SessionStore>,
    pub collection: Arc<CollectionStore>,
    pub controller: SyncController,
}

impl AppState {
    /// Wire the production adapters into the stores and controller.
    pub fn new(config: &AppConfig) -> Result<Self, RemoteConfigError> {
        let storage: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(config.credentials.clone()));
        let inspector: Arc<dyn TokenInspector> =
            Arc::new(JwtTokenInspector::new(config.tokens.clone()));
        let remote: Arc<dyn RemoteAuthority> = Arc::new(HttpRemoteAuthority::new(
            config.remote.clone(),
            storage.clone(),
        )?);

        Ok(Self::from_parts(remote, storage, inspector))
    }

    pub fn from_parts(
        remote: Arc<dyn RemoteAuthority>,
        storage: Arc<dyn CredentialStore>,
        inspector: Arc<dyn TokenInspector>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(storage.clone(), inspector.clone()));
        let collection = Arc::new(CollectionStore::new());
        let controller = SyncController::new(
            remote,
            storage,
            inspector,
            session.clone(),
            collection.clone(),
        );

        Self {
            session,
            collection,
            controller,
        }
    }
}
