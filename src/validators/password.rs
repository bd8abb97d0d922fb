use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Length rules applied to new passwords at signup.
///
/// Lengths are counted in characters. Login only checks that a password was
/// supplied, see [`validate_login_password`].
///
/// ```
/// use tessera::validators::PasswordPolicy;
///
/// let policy = PasswordPolicy::default();
/// assert!(policy.validate("password123").is_ok());
/// assert!(policy.validate("short").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    /// Case-insensitive blocklist.
    #[serde(default)]
    pub disallowed_passwords: Vec<String>,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            disallowed_passwords: Vec::new(),
        }
    }
}

impl PasswordPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min(mut self, len: usize) -> Self {
        self.min_length = len;
        self
    }

    #[must_use]
    pub fn max(mut self, len: usize) -> Self {
        self.max_length = len;
        self
    }

    #[must_use]
    pub fn disallowed_passwords(mut self, passwords: Vec<String>) -> Self {
        self.disallowed_passwords = passwords;
        self
    }

    /// # Errors
    ///
    /// Returns a `ValidationError` describing the first rule the password breaks.
    pub fn validate(&self, password: &str) -> Result<(), ValidationError> {
        if password.is_empty() {
            return Err(ValidationError::PasswordEmpty);
        }

        let length = password.chars().count();

        if length < self.min_length {
            return Err(ValidationError::PasswordTooShort(self.min_length));
        }

        if length > self.max_length {
            return Err(ValidationError::PasswordTooLong(self.max_length));
        }

        if self
            .disallowed_passwords
            .iter()
            .any(|p| p.eq_ignore_ascii_case(password))
        {
            return Err(ValidationError::PasswordCommon);
        }

        Ok(())
    }
}

/// Login only requires that a password was entered.
pub fn validate_login_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }
    Ok(())
}
