//! Input validation for credentials and todo fields.
//!
//! Actions run these before touching storage, so a malformed request never
//! costs a password hash or a database round trip.

mod password;
mod title;
mod username;

pub use password::{PasswordPolicy, validate_login_password};
pub use title::validate_title;
pub use username::{MAX_USERNAME_LENGTH, validate_login_username, validate_username};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    UsernameEmpty,
    UsernameTooLong,
    UsernameInvalidCharacters,
    PasswordEmpty,
    PasswordTooShort(usize),
    PasswordTooLong(usize),
    PasswordCommon,
    TitleEmpty,
    TitleTooLong,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernameEmpty => write!(f, "Username is required"),
            Self::UsernameTooLong => write!(
                f,
                "Username must be less than {} characters",
                MAX_USERNAME_LENGTH + 1
            ),
            Self::UsernameInvalidCharacters => {
                write!(f, "Username must not contain whitespace or control characters")
            }
            Self::PasswordEmpty => write!(f, "Password is required"),
            Self::PasswordTooShort(min) => write!(f, "Password must be at least {min} characters"),
            Self::PasswordTooLong(max) => write!(f, "Password must be at most {max} characters"),
            Self::PasswordCommon => write!(f, "Password is too common"),
            Self::TitleEmpty => write!(f, "Title is required"),
            Self::TitleTooLong => write!(f, "Title must be at most 200 characters"),
        }
    }
}

impl std::error::Error for ValidationError {}
