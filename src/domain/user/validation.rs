//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("User ID contains invalid character: '{0}'. Only alphanumeric characters, hyphens and underscores are allowed")]
    InvalidIdCharacter(char),
}

const MAX_USER_ID_LENGTH: usize = 64;

/// Validate a user ID
///
/// Platform subjects are UUIDs, but any short token of alphanumerics,
/// hyphens and underscores is accepted.
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    if let Some(c) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(UserValidationError::InvalidIdCharacter(c));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_ids() {
        assert!(validate_user_id("user-1").is_ok());
        assert!(validate_user_id("6f1c2a9e-58d4-4c1b-9a55-2f0f3b9d7e11").is_ok());
        assert!(validate_user_id("service_account").is_ok());
    }

    #[test]
    fn test_empty_user_id() {
        assert_eq!(validate_user_id(""), Err(UserValidationError::EmptyId));
    }

    #[test]
    fn test_user_id_too_long() {
        let long_id = "a".repeat(65);
        assert_eq!(
            validate_user_id(&long_id),
            Err(UserValidationError::IdTooLong(64))
        );
    }

    #[test]
    fn test_invalid_user_id_character() {
        assert_eq!(
            validate_user_id("user 1"),
            Err(UserValidationError::InvalidIdCharacter(' '))
        );
        assert_eq!(
            validate_user_id("user@example"),
            Err(UserValidationError::InvalidIdCharacter('@'))
        );
    }
}
