//! Field-level checks applied before any remote call.

use crate::domain::{Credentials, NewAccount, PostDraft};
use crate::error::ValidationError;

const TITLE_MAX_CHARS: usize = 255;
const USERNAME_MIN_CHARS: usize = 3;
const USERNAME_MAX_CHARS: usize = 50;
const PASSWORD_MIN_CHARS: usize = 6;

impl PostDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        require_max_chars("title", &self.title, TITLE_MAX_CHARS)?;
        require_non_empty("content", &self.content)
    }
}

impl Credentials {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("email", &self.email)?;
        require_email(&self.email)?;
        require_non_empty("password", &self.password)
    }
}

impl NewAccount {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("username", &self.username)?;
        require_min_chars("username", &self.username, USERNAME_MIN_CHARS)?;
        require_max_chars("username", &self.username, USERNAME_MAX_CHARS)?;
        require_non_empty("email", &self.email)?;
        require_email(&self.email)?;
        require_min_chars("password", &self.password, PASSWORD_MIN_CHARS)
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

fn require_min_chars(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

fn require_max_chars(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Accepts `local@domain.tld` shapes: one `@`, no whitespace, a dot inside
/// the domain part.
fn require_email(value: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = value.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };

    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.');

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_title_and_content() {
        assert_eq!(
            PostDraft::new("  ", "body").validate(),
            Err(ValidationError::Empty { field: "title" })
        );
        assert_eq!(
            PostDraft::new("Title", "").validate(),
            Err(ValidationError::Empty { field: "content" })
        );
        assert!(PostDraft::new("Title", "body").validate().is_ok());
    }

    #[test]
    fn test_draft_title_length_limit() {
        let long = "x".repeat(256);
        assert_eq!(
            PostDraft::new(long, "body").validate(),
            Err(ValidationError::TooLong {
                field: "title",
                max: 255
            })
        );
        assert!(PostDraft::new("x".repeat(255), "body").validate().is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(require_email("user@example.com").is_ok());
        assert!(require_email("first.last@mail.example.org").is_ok());

        for bad in [
            "userexample.com",
            "@example.com",
            "user@",
            "user@example",
            "user@.com",
            "user@example.",
            "us er@example.com",
            "a@b@example.com",
        ] {
            assert_eq!(require_email(bad), Err(ValidationError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn test_credentials_require_both_fields() {
        assert!(Credentials::new("user@example.com", "secret").validate().is_ok());
        assert_eq!(
            Credentials::new("user@example.com", "").validate(),
            Err(ValidationError::Empty { field: "password" })
        );
        assert_eq!(
            Credentials::new("", "secret").validate(),
            Err(ValidationError::Empty { field: "email" })
        );
    }

    #[test]
    fn test_new_account_constraints() {
        assert!(
            NewAccount::new("alice", "alice@example.com", "secret1")
                .validate()
                .is_ok()
        );
        assert_eq!(
            NewAccount::new("al", "alice@example.com", "secret1").validate(),
            Err(ValidationError::TooShort {
                field: "username",
                min: 3
            })
        );
        assert_eq!(
            NewAccount::new("alice", "alice@example.com", "12345").validate(),
            Err(ValidationError::TooShort {
                field: "password",
                min: 6
            })
        );
        assert_eq!(
            NewAccount::new("a".repeat(51), "alice@example.com", "secret1").validate(),
            Err(ValidationError::TooLong {
                field: "username",
                max: 50
            })
        );
    }
}
