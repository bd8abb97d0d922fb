//! Session-cookie authentication with pluggable storage.
//!
//! `tessera` owns the lifecycle of server-side sessions: minting opaque
//! session ids, validating them on every request, extending them before they
//! lapse and invalidating them on signout. On top of that it ships the
//! credential actions (signup, login, signout) and the per-user todo
//! procedures that run behind the authorization gate.
//!
//! # Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `mocks` | In-memory repositories for tests |
//! | `sqlx_sqlite` | `SQLite` repositories and embedded migrations |
//! | `axum_api` | Session middleware, extractor and routes for axum |
//! | `tracing` | `tracing` spans on actions and repositories |
//!
//! # Example
//!
//! ```rust,ignore
//! use tessera::session::{SessionConfig, SessionManager};
//!
//! let manager = SessionManager::new(session_repo, user_repo, SessionConfig::default());
//!
//! let session = manager.create_session(&user.id).await?;
//! let cookie = manager.create_session_cookie(&session.id);
//!
//! let validation = manager.validate_session(&session.id).await?;
//! assert!(validation.is_valid());
//! ```

pub mod actions;
pub mod config;
pub mod crypto;
pub mod events;
pub mod repository;
mod secret;
pub mod session;
pub mod todos;
pub mod validators;

#[cfg(feature = "axum_api")]
pub mod api;

#[cfg(feature = "sqlx_sqlite")]
pub mod sqlite;

use std::fmt;

pub use config::TesseraConfig;
pub use events::{AuthEvent, register_event_listeners};
pub use repository::{Session, SessionRepository, User, UserRepository};
pub use secret::SecretString;
pub use session::{
    AuthContext, CookieDirective, RequestContext, SessionConfig, SessionCookie, SessionManager,
    SessionValidation,
};
pub use todos::{Todo, TodoQuery, TodoRepository};
pub use validators::ValidationError;

#[cfg(any(test, feature = "mocks"))]
pub use repository::{MockSessionRepository, MockUserRepository};
#[cfg(any(test, feature = "mocks"))]
pub use todos::MockTodoRepository;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// No session, or the session is unknown or expired.
    Unauthenticated,
    /// Unknown username or wrong password. Deliberately one variant.
    InvalidCredentials,
    DuplicateUsername,
    Validation(ValidationError),
    NotFound,
    PasswordHashError,
    /// Any persistence failure. Not retried here.
    StorageUnavailable(String),
    ConfigurationError(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Unauthenticated => write!(f, "You must be logged in to access this route"),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthError::DuplicateUsername => write!(f, "Username already exists"),
            AuthError::Validation(err) => write!(f, "{err}"),
            AuthError::NotFound => write!(f, "Not found"),
            AuthError::PasswordHashError => write!(f, "Failed to hash password"),
            AuthError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {msg}"),
            AuthError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::Validation(err)
    }
}
