//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod remote;
mod storage;

pub use auth::{AuthError, TokenClaims, TokenInspector};
pub use remote::{RemoteAuthority, RemoteError};
pub use storage::{ACCESS_TOKEN_KEY, CredentialStore, REFRESH_TOKEN_KEY, StorageError};
