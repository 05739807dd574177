//! Token inspection implementations.

#[cfg(feature = "jwt")]
mod jwt;
mod opaque;

#[cfg(feature = "jwt")]
pub use jwt::{JwtInspectorConfig, JwtTokenInspector};
pub use opaque::OpaqueTokenInspector;
