use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;

pub const MAX_USERNAME_LENGTH: usize = 20;

#[allow(clippy::unwrap_used)]
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s\p{Cc}]+$").unwrap());

/// Usernames are 1 to 20 characters with no whitespace or control characters.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::UsernameInvalidCharacters);
    }

    Ok(())
}

/// Login only requires that a username was entered. Anything else is a
/// lookup miss, not a shape error.
pub fn validate_login_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }
    Ok(())
}
