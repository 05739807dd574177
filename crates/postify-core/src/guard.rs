//! Route guard - decides whether a view may be shown for the current session.

use crate::domain::Session;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Send the user to `to`, remembering `preserve` so a successful login
    /// can return there.
    Redirect { to: &'static str, preserve: String },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Map a requested location onto a known view. Unknown paths fall back to
/// the home view.
pub fn resolve(requested_path: &str) -> &'static str {
    match requested_path {
        LOGIN_PATH => LOGIN_PATH,
        SIGNUP_PATH => SIGNUP_PATH,
        _ => HOME_PATH,
    }
}

/// Decide on a navigation to `requested_path`.
///
/// Must be called on every navigation: the session can end between two
/// navigations, so a previous decision is never reused.
pub fn decide(session: &Session, requested_path: &str) -> Decision {
    let path = resolve(requested_path);

    if path == LOGIN_PATH || path == SIGNUP_PATH || session.is_authenticated {
        return Decision::Allow;
    }

    tracing::debug!(path, "Unauthenticated navigation redirected to login");
    Decision::Redirect {
        to: LOGIN_PATH,
        preserve: path.to_string(),
    }
}
