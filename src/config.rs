//! Top-level configuration.
//!
//! ```rust
//! use tessera::config::TesseraConfig;
//! use tessera::session::SessionConfig;
//! use tessera::validators::PasswordPolicy;
//! use chrono::Duration;
//!
//! let config = TesseraConfig {
//!     session: SessionConfig {
//!         session_lifetime: Duration::days(14),
//!         rotation_threshold: Duration::days(7),
//!         ..SessionConfig::default()
//!     },
//!     password_policy: PasswordPolicy::new().min(12),
//!     ..TesseraConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::AuthError;
use crate::crypto::Argon2Hasher;
use crate::session::SessionConfig;
use crate::validators::PasswordPolicy;

#[derive(Debug, Clone, Default)]
pub struct TesseraConfig {
    pub session: SessionConfig,
    pub password_policy: PasswordPolicy,
    pub hasher: Argon2Hasher,
}

impl TesseraConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain-http friendly: the session cookie is not marked `Secure`.
    pub fn development() -> Self {
        Self {
            session: SessionConfig::development(),
            ..Self::default()
        }
    }

    /// Heavier argon2 parameters and a failed renewal fails the request.
    pub fn production() -> Self {
        Self {
            session: SessionConfig {
                rotation_failure: crate::session::RotationFailurePolicy::Reject,
                ..SessionConfig::default()
            },
            password_policy: PasswordPolicy::default(),
            hasher: Argon2Hasher::production(),
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` naming the first bad setting.
    pub fn validate(&self) -> Result<(), AuthError> {
        self.session
            .validate()
            .map_err(|msg| AuthError::ConfigurationError(msg.to_owned()))?;

        if self.password_policy.min_length == 0
            || self.password_policy.min_length > self.password_policy.max_length
        {
            return Err(AuthError::ConfigurationError(
                "password min_length must be between 1 and max_length".to_owned(),
            ));
        }

        Ok(())
    }
}
