use serde::{Deserialize, Serialize};

/// Authentication state as seen by views and the route guard.
///
/// `user_id` is only ever `Some` while `is_authenticated` is true. After a
/// restart the flag is restored from durable storage but the identity is
/// not, so an authenticated session may carry no `user_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub user_id: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session restored from a persisted credential, identity unknown.
    pub fn restored() -> Self {
        Self {
            is_authenticated: true,
            user_id: None,
        }
    }

    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            user_id: Some(user_id.into()),
        }
    }
}
