//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::error::AuthError;

/// Upper bound on accepted passwords, keeps hashing work bounded
const MAX_PASSWORD_BYTES: usize = 1024;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    if email.is_empty() {
        return Err(AuthError::ValidationFailed("email is required".to_string()));
    }

    if email.len() > 254 {
        return Err(AuthError::ValidationFailed(
            "email must be at most 254 characters long".to_string(),
        ));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(AuthError::ValidationFailed("invalid email format".to_string()));
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::ValidationFailed(
            "password is required".to_string(),
        ));
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::ValidationFailed(format!(
            "password must be at most {} bytes long",
            MAX_PASSWORD_BYTES
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), AuthError>) -> String {
        match result {
            Err(AuthError::ValidationFailed(msg)) => msg,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_emails() {
        for email in ["a@x.com", "first.last+tag@sub.example.org", "A_B@x.io"] {
            assert!(validate_email(email).is_ok(), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(message(validate_email("")), "email is required");
        assert_eq!(message(validate_email("no-at-sign")), "invalid email format");
        assert_eq!(message(validate_email("a@x")), "invalid email format");
        assert_eq!(message(validate_email("a b@x.com")), "invalid email format");

        let long = format!("{}@x.com", "a".repeat(250));
        assert!(message(validate_email(&long)).contains("254"));
    }

    #[test]
    fn test_passwords() {
        assert!(validate_password("pw1").is_ok());
        assert!(validate_password(" ").is_ok());
        assert_eq!(message(validate_password("")), "password is required");
        assert!(validate_password(&"x".repeat(MAX_PASSWORD_BYTES)).is_ok());
        assert!(validate_password(&"x".repeat(MAX_PASSWORD_BYTES + 1)).is_err());
    }
}
