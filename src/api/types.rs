use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionValidation;
use crate::{AuthError, SecretString, Session, User};

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

// Response DTOs

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

/// Returned by signup and login. The session id itself travels only in the
/// cookie.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<UserResponse>,
    pub expires_at: Option<DateTime<Utc>>,
    pub fresh: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
        }
    }
}

impl AuthResponse {
    pub fn new(user: User, session: &Session) -> Self {
        Self {
            user: user.into(),
            expires_at: session.expires_at,
        }
    }
}

impl From<&SessionValidation> for SessionResponse {
    fn from(validation: &SessionValidation) -> Self {
        SessionResponse {
            authenticated: validation.is_valid(),
            user: validation.user.clone().map(Into::into),
            expires_at: validation.session.as_ref().map(|s| s.expires_at),
            fresh: validation.fresh,
        }
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::Unauthenticated => "UNAUTHENTICATED",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::DuplicateUsername => "DUPLICATE_USERNAME",
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::NotFound => "NOT_FOUND",
            AuthError::PasswordHashError => "PASSWORD_HASH_ERROR",
            AuthError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            AuthError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        };

        // storage and config details stay in the logs
        let error = match &err {
            AuthError::StorageUnavailable(_) | AuthError::ConfigurationError(_) => {
                "Internal server error".to_owned()
            }
            _ => err.to_string(),
        };

        ErrorResponse {
            error,
            code: code.to_owned(),
        }
    }
}
