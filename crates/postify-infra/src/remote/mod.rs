//! Remote authority implementations.

mod http;

pub use http::{HttpRemoteAuthority, RemoteConfig, RemoteConfigError};
