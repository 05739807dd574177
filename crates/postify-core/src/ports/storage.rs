use async_trait::async_trait;

/// Durable storage key of the access credential.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Durable storage key of the refresh credential.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Credential store trait - abstraction over durable key/value storage.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Get a stored value.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Credential storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
