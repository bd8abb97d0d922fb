use chrono::Utc;

use crate::crypto::{Argon2Hasher, PasswordHasher, generate_user_id};
use crate::events::{AuthEvent, dispatch};
use crate::session::SessionManager;
use crate::validators::{PasswordPolicy, validate_username};
use crate::{AuthError, SecretString, Session, SessionRepository, User, UserRepository};

pub struct SignupAction<S, U, H = Argon2Hasher> {
    manager: SessionManager<S, U>,
    password_policy: PasswordPolicy,
    hasher: H,
}

impl<S: SessionRepository, U: UserRepository> SignupAction<S, U, Argon2Hasher> {
    pub fn new(manager: SessionManager<S, U>) -> Self {
        Self {
            manager,
            password_policy: PasswordPolicy::default(),
            hasher: Argon2Hasher::default(),
        }
    }

    pub fn with_policy(manager: SessionManager<S, U>, password_policy: PasswordPolicy) -> Self {
        Self {
            manager,
            password_policy,
            hasher: Argon2Hasher::default(),
        }
    }
}

impl<S: SessionRepository, U: UserRepository, H: PasswordHasher> SignupAction<S, U, H> {
    pub fn with_hasher(
        manager: SessionManager<S, U>,
        password_policy: PasswordPolicy,
        hasher: H,
    ) -> Self {
        Self {
            manager,
            password_policy,
            hasher,
        }
    }

    /// Registers a user and logs them in.
    ///
    /// The lookup before hashing only saves work on the common case; the
    /// store's unique constraint is what decides a race between two signups
    /// for the same name.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "signup", skip_all, err))]
    pub async fn execute(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<(User, Session), AuthError> {
        let username = username.trim();
        validate_username(username)?;
        self.password_policy.validate(password.expose_secret())?;

        let users = self.manager.users();
        if users.find_user_by_username(username).await?.is_some() {
            log::info!(
                target: "tessera",
                "msg=\"signup rejected\" reason=\"username taken\""
            );
            return Err(AuthError::DuplicateUsername);
        }

        let user = User {
            id: generate_user_id(),
            username: username.to_owned(),
            password_hash: self.hasher.hash(password.expose_secret())?,
        };
        users.create_user(&user).await?;

        dispatch(AuthEvent::UserRegistered {
            user_id: user.id.clone(),
            username: user.username.clone(),
            at: Utc::now(),
        })
        .await;

        let session = self.manager.create_session(&user.id).await?;

        log::info!(
            target: "tessera",
            "msg=\"signup success\" user_id=\"{}\"",
            user.id
        );

        Ok((user, session))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::validators::ValidationError;
    use crate::{MockSessionRepository, MockUserRepository, SessionConfig};

    fn fast_hasher() -> Argon2Hasher {
        Argon2Hasher::new(1024, 1, 1)
    }

    fn action() -> SignupAction<MockSessionRepository, MockUserRepository> {
        let manager = SessionManager::new(
            MockSessionRepository::new(),
            MockUserRepository::new(),
            SessionConfig::default(),
        );
        SignupAction::with_hasher(manager, PasswordPolicy::default(), fast_hasher())
    }

    #[tokio::test]
    async fn test_signup_success() {
        let signup = action();
        let password = SecretString::new("hunter22hunter22");

        let (user, session) = signup.execute("alice", &password).await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.id.len(), 16);
        assert_ne!(user.password_hash, "hunter22hunter22");
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_eq!(session.user_id, user.id);

        let validation = signup.manager.validate_session(&session.id).await.unwrap();
        assert_eq!(validation.user.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_signup_trims_username() {
        let signup = action();
        let (user, _) = signup
            .execute("  alice ", &SecretString::new("hunter22hunter22"))
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let signup = action();
        let password = SecretString::new("hunter22hunter22");

        signup.execute("alice", &password).await.unwrap();
        let result = signup.execute("alice", &password).await;

        assert_eq!(result.unwrap_err(), AuthError::DuplicateUsername);
        assert_eq!(signup.manager.users().len(), 1);
    }

    #[tokio::test]
    async fn test_signup_validation_happens_before_storage() {
        let signup = action();

        let result = signup.execute("alice", &SecretString::new("short")).await;
        assert_eq!(
            result.unwrap_err(),
            AuthError::Validation(ValidationError::PasswordTooShort(8))
        );

        let result = signup
            .execute(&"a".repeat(21), &SecretString::new("hunter22hunter22"))
            .await;
        assert_eq!(
            result.unwrap_err(),
            AuthError::Validation(ValidationError::UsernameTooLong)
        );

        let result = signup
            .execute("   ", &SecretString::new("hunter22hunter22"))
            .await;
        assert_eq!(
            result.unwrap_err(),
            AuthError::Validation(ValidationError::UsernameEmpty)
        );

        assert!(signup.manager.users().is_empty());
        assert!(signup.manager.sessions().is_empty());
    }

    /// Lookups never see a concurrent insert, so only `create_user` can catch
    /// the duplicate.
    #[derive(Clone, Default)]
    struct StaleLookupUsers(MockUserRepository);

    #[async_trait]
    impl UserRepository for StaleLookupUsers {
        async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AuthError> {
            self.0.find_user_by_id(id).await
        }

        async fn find_user_by_username(&self, _: &str) -> Result<Option<User>, AuthError> {
            Ok(None)
        }

        async fn create_user(&self, user: &User) -> Result<(), AuthError> {
            self.0.create_user(user).await
        }
    }

    #[tokio::test]
    async fn test_racing_signups_one_wins_at_insert() {
        let users = StaleLookupUsers::default();
        let sessions = MockSessionRepository::new();
        let manager =
            SessionManager::new(sessions.clone(), users.clone(), SessionConfig::default());
        let signup = SignupAction::with_hasher(manager, PasswordPolicy::default(), fast_hasher());
        let password = SecretString::new("hunter22hunter22");

        let (first, second) = tokio::join!(
            signup.execute("alice", &password),
            signup.execute("alice", &password)
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            outcomes
                .iter()
                .any(|r| matches!(r, Err(AuthError::DuplicateUsername)))
        );
        assert_eq!(users.0.len(), 1);
        assert_eq!(sessions.len(), 1);
    }
}
