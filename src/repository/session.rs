use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// One authenticated browser context.
///
/// The id doubles as the bearer token carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    /// Issuance time. Refreshes never extend a session past
    /// `created_at + max_lifetime`.
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        self.expires_at - now
    }
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(&self, session: &Session) -> Result<(), AuthError>;

    /// Returns the row as stored, expired or not. Expiry is the caller's call.
    async fn find_session(&self, session_id: &str) -> Result<Option<Session>, AuthError>;

    /// Sets a new expiry. Updating a missing row is not an error.
    async fn update_session_expiry(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError>;

    /// Deletes a session. Deleting a missing row is not an error.
    async fn delete_session(&self, session_id: &str) -> Result<(), AuthError>;

    /// Deletes every session of a user, returning how many went.
    async fn delete_user_sessions(&self, user_id: &str) -> Result<u64, AuthError>;

    /// Removes sessions whose expiry has passed.
    ///
    /// Returns the number of sessions pruned.
    async fn prune_expired(&self) -> Result<u64, AuthError>;
}
