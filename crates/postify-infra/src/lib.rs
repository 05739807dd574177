//! # Postify Infrastructure
//!
//! Concrete implementations of the ports defined in `postify-core`.
//! This crate contains the HTTP transport, durable credential storage and
//! token inspection.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `http` - REST remote authority via reqwest
//! - `jwt` - Access token inspection via jsonwebtoken

pub mod auth;
pub mod storage;

#[cfg(feature = "http")]
pub mod remote;

// Re-exports - always available
pub use auth::OpaqueTokenInspector;
pub use storage::{FileCredentialStore, FileStoreConfig, InMemoryCredentialStore};

#[cfg(feature = "jwt")]
pub use auth::{JwtInspectorConfig, JwtTokenInspector};

#[cfg(feature = "http")]
pub use remote::{HttpRemoteAuthority, RemoteConfig, RemoteConfigError};
