//! Request field validation.

use crate::error::AppError;
use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

pub fn required(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), AppError> {
    if !email_re().is_match(value) {
        return Err(AppError::Validation("email must be a valid address".into()));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), AppError> {
    if value.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(email("ada@school.test").is_ok());
        assert!(email("a.b+tag@example.co").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(email("not-an-email").is_err());
        assert!(email("a@b").is_err());
        assert!(email("a b@c.d").is_err());
    }

    #[test]
    fn required_rejects_blank() {
        assert!(required("first_name", "  ").is_err());
        assert!(required("first_name", "Ada").is_ok());
    }

    #[test]
    fn password_enforces_minimum_length() {
        assert!(password("short").is_err());
        assert!(password("long enough").is_ok());
    }
}
