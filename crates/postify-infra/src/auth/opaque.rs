use postify_core::ports::{AuthError, TokenClaims, TokenInspector};

/// Inspector for deployments whose credentials carry no readable claims.
///
/// Every credential is reported as undecodable, so a persisted token always
/// counts as present and never as expired.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueTokenInspector;

impl TokenInspector for OpaqueTokenInspector {
    fn inspect(&self, _token: &str) -> Result<TokenClaims, AuthError> {
        Err(AuthError::InvalidToken("opaque credential".to_string()))
    }
}
