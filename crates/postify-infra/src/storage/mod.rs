//! Credential storage implementations - JSON file and in-memory fallback.

mod file;
mod memory;

pub use file::{FileCredentialStore, FileStoreConfig};
pub use memory::InMemoryCredentialStore;
