//! JWT claim inspection.
//!
//! The client has no signing secret, so signatures are not verified here;
//! the server still rejects forged tokens. Only the expiry and subject are
//! read.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use postify_core::ports::{AuthError, TokenClaims, TokenInspector};

/// JWT inspector configuration.
#[derive(Debug, Clone)]
pub struct JwtInspectorConfig {
    /// Seconds of clock skew tolerated when checking `exp`.
    pub leeway_secs: u64,
}

impl Default for JwtInspectorConfig {
    fn default() -> Self {
        Self { leeway_secs: 0 }
    }
}

impl JwtInspectorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            leeway_secs: std::env::var("POSTIFY_TOKEN_LEEWAY_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        }
    }
}

/// Internal claims structure for deserialization.
#[derive(Debug, Deserialize)]
struct Claims {
    // String in most deployments, integer in some.
    #[serde(default)]
    sub: Option<serde_json::Value>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Reads `sub` and `exp` from JWT access tokens.
pub struct JwtTokenInspector {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenInspector {
    pub fn new(config: JwtInspectorConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        validation.validate_exp = true;
        validation.leeway = config.leeway_secs;

        Self {
            decoding_key: DecodingKey::from_secret(&[]),
            validation,
        }
    }

    pub fn from_env() -> Self {
        Self::new(JwtInspectorConfig::from_env())
    }
}

impl Default for JwtTokenInspector {
    fn default() -> Self {
        Self::new(JwtInspectorConfig::default())
    }
}

impl TokenInspector for JwtTokenInspector {
    fn inspect(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        let subject = token_data.claims.sub.and_then(|sub| match sub {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Ok(TokenClaims {
            subject,
            expires_at: token_data
                .claims
                .exp
                .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0)),
        })
    }
}
