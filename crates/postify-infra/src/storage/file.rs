//! JSON file credential store - durable storage across restarts.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use postify_core::ports::{CredentialStore, StorageError};

const DEFAULT_RELATIVE_PATH: &str = ".postify/credentials.json";

/// File store configuration.
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    pub path: PathBuf,
}

impl FileStoreConfig {
    /// Load configuration from environment variables.
    ///
    /// `POSTIFY_CREDENTIALS_PATH` wins; otherwise the file lives under
    /// `$HOME/.postify/`, or the working directory when `HOME` is unset.
    pub fn from_env() -> Self {
        let path = std::env::var("POSTIFY_CREDENTIALS_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                std::env::var("HOME")
                    .map(|home| PathBuf::from(home).join(DEFAULT_RELATIVE_PATH))
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_RELATIVE_PATH))
            });

        Self { path }
    }
}

/// Credential store backed by a single JSON object on disk.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves a truncated file behind. The mutex only
/// serializes writers inside this process.
pub struct FileCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(config: FileStoreConfig) -> Self {
        Self {
            path: config.path,
            lock: Mutex::new(()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(FileStoreConfig::from_env())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(values)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        restrict_permissions(&tmp).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), StorageError> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), StorageError> {
    Ok(())
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Option<String> {
        match self.load().await {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read credentials");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values).await?;

        tracing::debug!(key = %key, path = %self.path.display(), "Credential stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        // An unreadable file is replaced rather than left holding the key.
        let (mut values, corrupt) = match self.load().await {
            Ok(values) => (values, false),
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding corrupt credentials file");
                (BTreeMap::new(), true)
            }
            Err(e) => return Err(e),
        };

        if values.remove(key).is_none() && !corrupt {
            return Ok(());
        }

        if values.is_empty() {
            match tokio::fs::remove_file(&self.path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            return Ok(());
        }

        self.save(&values).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postify_core::ports::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

    fn store_in(dir: &tempfile::TempDir) -> FileCredentialStore {
        FileCredentialStore::new(FileStoreConfig {
            path: dir.path().join("nested").join("credentials.json"),
        })
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get(ACCESS_TOKEN_KEY).await, None);
    }

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(ACCESS_TOKEN_KEY, "x").await.unwrap();
        store.set(REFRESH_TOKEN_KEY, "y").await.unwrap();

        let reopened = store_in(&dir);

        assert_eq!(reopened.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("x"));
        assert_eq!(reopened.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn test_file_uses_storage_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(ACCESS_TOKEN_KEY, "x").await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["accessToken"], "x");
    }

    #[tokio::test]
    async fn test_removing_last_key_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(ACCESS_TOKEN_KEY, "x").await.unwrap();
        store.set(REFRESH_TOKEN_KEY, "y").await.unwrap();

        store.remove(ACCESS_TOKEN_KEY).await.unwrap();
        assert!(store.path().exists());
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("y"));

        store.remove(REFRESH_TOKEN_KEY).await.unwrap();
        assert!(!store.path().exists());

        // Removing again is a no-op.
        store.remove(REFRESH_TOKEN_KEY).await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_replaced_on_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).await, None);
        store.remove(ACCESS_TOKEN_KEY).await.unwrap();

        assert!(!store.path().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(ACCESS_TOKEN_KEY, "x").await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
