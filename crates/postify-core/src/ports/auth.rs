//! Credential inspection port.

use chrono::{DateTime, Utc};

/// Claims read from an access credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenClaims {
    /// The identity the credential was issued to (`sub`).
    pub subject: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Reads claims from persisted credentials without contacting the server.
pub trait TokenInspector: Send + Sync {
    /// Decode a credential.
    ///
    /// Returns [`AuthError::TokenExpired`] for a well-formed credential past
    /// its expiry and [`AuthError::InvalidToken`] for anything that cannot be
    /// decoded.
    fn inspect(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Credential inspection errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
