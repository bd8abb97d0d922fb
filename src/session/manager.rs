use chrono::{DateTime, Utc};

use super::config::{RotationFailurePolicy, SessionConfig};
use super::cookie::{CookieDirective, SessionCookie};
use super::gate::{AuthContext, RequestContext, Resolution, SessionValidation, authorize};
use crate::crypto::{generate_session_id, is_well_formed_id};
use crate::events::{AuthEvent, dispatch};
use crate::repository::{Session, SessionRepository, UserRepository};
use crate::AuthError;

/// Owns the lifecycle of session rows.
///
/// Every operation is a bounded request against the repositories. Storage
/// errors propagate; a missing or expired session is a normal outcome and
/// comes back as an absent [`SessionValidation`], never as an error.
#[derive(Clone)]
pub struct SessionManager<S, U> {
    sessions: S,
    users: U,
    config: SessionConfig,
}

impl<S, U> SessionManager<S, U>
where
    S: SessionRepository,
    U: UserRepository,
{
    pub fn new(sessions: S, users: U, config: SessionConfig) -> Self {
        Self {
            sessions,
            users,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    /// Issues a new session for `user_id`.
    ///
    /// The caller has already authenticated the user; credentials are not
    /// re-checked here.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "create_session", skip_all, err))]
    pub async fn create_session(&self, user_id: &str) -> Result<Session, AuthError> {
        let now = Utc::now();
        let session = Session {
            id: generate_session_id(),
            user_id: user_id.to_owned(),
            expires_at: now + self.config.session_lifetime,
            created_at: now,
        };

        self.sessions.create_session(&session).await?;

        log::debug!(
            target: "tessera::session",
            "msg=\"session created\" user_id=\"{user_id}\" expires_at=\"{}\"",
            session.expires_at
        );
        dispatch(AuthEvent::SessionCreated {
            user_id: user_id.to_owned(),
            at: now,
        })
        .await;

        Ok(session)
    }

    /// Looks up a session and its user.
    ///
    /// Empty or malformed ids are absent without a storage round trip. An
    /// expired row is deleted on the spot and reported absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "validate_session", skip_all, err))]
    pub async fn validate_session(&self, session_id: &str) -> Result<SessionValidation, AuthError> {
        if !is_well_formed_id(session_id) {
            return Ok(SessionValidation::absent());
        }

        let Some(session) = self.sessions.find_session(session_id).await? else {
            return Ok(SessionValidation::absent());
        };

        let now = Utc::now();
        if session.is_expired_at(now) {
            self.sessions.delete_session(&session.id).await?;
            log::debug!(
                target: "tessera::session",
                "msg=\"expired session reaped\" user_id=\"{}\"",
                session.user_id
            );
            dispatch(AuthEvent::SessionExpired {
                user_id: session.user_id,
                at: now,
            })
            .await;
            return Ok(SessionValidation::absent());
        }

        let Some(user) = self.users.find_user_by_id(&session.user_id).await? else {
            // user removed out from under the session
            return Ok(SessionValidation::absent());
        };

        let fresh = self.is_fresh(&session, now);
        Ok(SessionValidation {
            session: Some(session),
            user: Some(user),
            fresh,
        })
    }

    /// Validates and applies the gate in one step.
    pub async fn authorize(&self, session_id: &str) -> Result<AuthContext, AuthError> {
        authorize(&self.validate_session(session_id).await?)
    }

    /// Builds the live cookie for `session_id`. No storage access.
    pub fn create_session_cookie(&self, session_id: &str) -> SessionCookie {
        SessionCookie::live(session_id, &self.config)
    }

    /// Extends the session per the rotation policy and returns its cookie.
    ///
    /// The id is kept; only the expiry moves. Refreshing an id that does not
    /// name a live session is `Unauthenticated`.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "refresh_session", skip_all, err))]
    pub async fn refresh_session(&self, session_id: &str) -> Result<SessionCookie, AuthError> {
        if !is_well_formed_id(session_id) {
            return Err(AuthError::Unauthenticated);
        }

        let session = self
            .sessions
            .find_session(session_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        let now = Utc::now();
        if session.is_expired_at(now) {
            return Err(AuthError::Unauthenticated);
        }

        let expires_at = self.extended_expiry(&session, now);
        if expires_at > session.expires_at {
            self.sessions
                .update_session_expiry(&session.id, expires_at)
                .await?;

            log::debug!(
                target: "tessera::session",
                "msg=\"session refreshed\" user_id=\"{}\" expires_at=\"{expires_at}\"",
                session.user_id
            );
            dispatch(AuthEvent::SessionRefreshed {
                user_id: session.user_id.clone(),
                expires_at,
                at: now,
            })
            .await;
        }

        Ok(self.create_session_cookie(&session.id))
    }

    /// A cookie that makes the client forget its session. No storage access.
    pub fn create_blank_session_cookie(&self) -> SessionCookie {
        SessionCookie::blank(&self.config)
    }

    /// Deletes a session. Invalidating an absent session succeeds.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "invalidate_session", skip_all, err)
    )]
    pub async fn invalidate_session(&self, session_id: &str) -> Result<(), AuthError> {
        if !is_well_formed_id(session_id) {
            return Ok(());
        }
        self.sessions.delete_session(session_id).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "invalidate_user_sessions", skip_all, err)
    )]
    pub async fn invalidate_user_sessions(&self, user_id: &str) -> Result<u64, AuthError> {
        let count = self.sessions.delete_user_sessions(user_id).await?;

        log::info!(
            target: "tessera::session",
            "msg=\"user sessions invalidated\" user_id=\"{user_id}\" count={count}"
        );
        dispatch(AuthEvent::SessionsRevoked {
            user_id: user_id.to_owned(),
            count,
            at: Utc::now(),
        })
        .await;

        Ok(count)
    }

    /// Decides identity and cookie for one request.
    ///
    /// - no valid session: blank cookie
    /// - valid and fresh: renew, issue the cookie again
    /// - valid otherwise: leave the cookie alone
    ///
    /// A failed renewal is handled per [`RotationFailurePolicy`].
    pub async fn resolve(&self, session_id: Option<&str>) -> Result<Resolution, AuthError> {
        let validation = match session_id {
            Some(id) => self.validate_session(id).await?,
            None => SessionValidation::absent(),
        };

        let cookie = match &validation.session {
            None => CookieDirective::Blank(self.create_blank_session_cookie()),
            Some(session) if validation.fresh => match self.refresh_session(&session.id).await {
                Ok(cookie) => CookieDirective::Issue(cookie),
                Err(err) => match self.config.rotation_failure {
                    RotationFailurePolicy::LogAndContinue => {
                        log::warn!(
                            target: "tessera::session",
                            "msg=\"failed to refresh session\" user_id=\"{}\" error=\"{err}\"",
                            session.user_id
                        );
                        CookieDirective::Unchanged
                    }
                    RotationFailurePolicy::Reject => return Err(err),
                },
            },
            Some(_) => CookieDirective::Unchanged,
        };

        Ok(Resolution {
            context: RequestContext {
                session_id: session_id.map(ToOwned::to_owned),
                validation,
            },
            cookie,
        })
    }

    /// Deletes every expired session. Optional housekeeping; validation reaps
    /// expired rows on its own.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "prune_expired_sessions", skip_all, err)
    )]
    pub async fn prune_expired(&self) -> Result<u64, AuthError> {
        let pruned = self.sessions.prune_expired().await?;
        log::info!(target: "tessera::session", "msg=\"sessions pruned\" count={pruned}");
        Ok(pruned)
    }

    fn hard_expiry(&self, session: &Session) -> DateTime<Utc> {
        session.created_at + self.config.max_lifetime
    }

    fn extended_expiry(&self, session: &Session, now: DateTime<Utc>) -> DateTime<Utc> {
        (now + self.config.session_lifetime).min(self.hard_expiry(session))
    }

    fn is_fresh(&self, session: &Session, now: DateTime<Utc>) -> bool {
        session.remaining_at(now) < self.config.rotation_threshold
            && self.extended_expiry(session, now) > session.expires_at
    }
}
