use chrono::Utc;

use crate::crypto::{Argon2Hasher, PasswordHasher, verify_dummy};
use crate::events::{AuthEvent, dispatch};
use crate::session::SessionManager;
use crate::validators::{validate_login_password, validate_login_username};
use crate::{AuthError, SecretString, Session, SessionRepository, User, UserRepository};

pub struct LoginAction<S, U, H = Argon2Hasher> {
    manager: SessionManager<S, U>,
    hasher: H,
}

impl<S: SessionRepository, U: UserRepository> LoginAction<S, U, Argon2Hasher> {
    pub fn new(manager: SessionManager<S, U>) -> Self {
        Self {
            manager,
            hasher: Argon2Hasher::default(),
        }
    }
}

impl<S: SessionRepository, U: UserRepository, H: PasswordHasher> LoginAction<S, U, H> {
    pub fn with_hasher(manager: SessionManager<S, U>, hasher: H) -> Self {
        Self { manager, hasher }
    }

    /// Verifies credentials and opens exactly one new session.
    ///
    /// Unknown usernames and wrong passwords both come back as
    /// `InvalidCredentials`, and both pay for one password verification.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "login", skip_all, err))]
    pub async fn execute(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<(User, Session), AuthError> {
        let username = username.trim();
        validate_login_username(username)?;
        validate_login_password(password.expose_secret())?;

        let Some(user) = self.manager.users().find_user_by_username(username).await? else {
            verify_dummy(&self.hasher, password.expose_secret());
            self.fail(username, "unknown user").await;
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(password.expose_secret(), &user.password_hash)?
        {
            self.fail(username, "invalid password").await;
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.manager.create_session(&user.id).await?;

        dispatch(AuthEvent::LoginSuccess {
            user_id: user.id.clone(),
            username: user.username.clone(),
            at: Utc::now(),
        })
        .await;
        log::info!(
            target: "tessera",
            "msg=\"login success\" user_id=\"{}\"",
            user.id
        );

        Ok((user, session))
    }

    async fn fail(&self, username: &str, reason: &str) {
        log::info!(
            target: "tessera",
            "msg=\"login failed\" reason=\"{reason}\""
        );
        dispatch(AuthEvent::LoginFailed {
            username: username.to_owned(),
            reason: reason.to_owned(),
            at: Utc::now(),
        })
        .await;
    }
}
