//! Error bodies returned by the backend.

use serde::{Deserialize, Serialize};

/// Error payload of a non-2xx response.
///
/// The backend reports failures either as `{"message": ...}` or as
/// `{"error": ...}`; validation failures may carry neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable description, if any.
    pub fn detail(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }

    /// Decode a raw response body, falling back to the raw text.
    pub fn describe(raw: &str) -> String {
        serde_json::from_str::<ErrorBody>(raw)
            .ok()
            .and_then(|body| body.detail().map(str::to_owned))
            .unwrap_or_else(|| raw.trim().to_string())
    }
}
