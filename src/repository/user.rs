use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[cfg(any(test, feature = "mocks"))]
impl User {
    pub fn mock() -> Self {
        Self::mock_from_credentials("test_user", "fakehashedpassword")
    }

    pub fn mock_from_credentials(username: &str, password_hash: &str) -> Self {
        User {
            id: crate::crypto::generate_user_id(),
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AuthError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Inserts a user.
    ///
    /// Must fail with [`AuthError::DuplicateUsername`] when the username is
    /// taken, atomically with the insert. A lookup beforehand is not enough
    /// under concurrent signups.
    async fn create_user(&self, user: &User) -> Result<(), AuthError>;
}
