//! Client-level error types.

use std::fmt;

use thiserror::Error;

/// Input rejected locally, before any request reaches the remote authority.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Page must be 1 or greater, got {0}")]
    InvalidPage(u32),
}

/// A user-initiated operation handled by the sync controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    LoadPage,
    CreatePost,
    UpdatePost,
    DeletePost,
    Login,
    Signup,
    Logout,
    Refresh,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Intent::LoadPage => "Loading posts",
            Intent::CreatePost => "Creating the post",
            Intent::UpdatePost => "Updating the post",
            Intent::DeletePost => "Deleting the post",
            Intent::Login => "Signing in",
            Intent::Signup => "Creating the account",
            Intent::Logout => "Signing out",
            Intent::Refresh => "Refreshing the session",
        };
        f.write_str(label)
    }
}

/// The single failure category reported at the sync controller boundary.
///
/// Validation, authentication, ownership and transport failures all collapse
/// into this value. The cause is logged where it happens and is deliberately
/// not carried, so callers can only show a generic retry message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{intent} failed, try again")]
pub struct SyncError {
    intent: Intent,
}

impl SyncError {
    pub fn new(intent: Intent) -> Self {
        Self { intent }
    }

    /// The operation that failed.
    pub fn intent(&self) -> Intent {
        self.intent
    }
}
