//! Authorization gate.
//!
//! Turns a validation result into either an identity the business procedures
//! can run with, or `Unauthenticated`. Nothing here touches storage.

use serde::Serialize;

use super::cookie::CookieDirective;
use crate::repository::{Session, User};
use crate::AuthError;

/// Outcome of validating a session id.
///
/// `session` and `user` are either both present or both absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionValidation {
    pub session: Option<Session>,
    pub user: Option<User>,
    /// The session should be renewed on this request.
    pub fresh: bool,
}

impl SessionValidation {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.session.is_some() && self.user.is_some()
    }
}

/// Identity handed to procedures that require a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub session: Session,
    pub user: User,
}

impl AuthContext {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

/// Per-request context.
///
/// Built once by the transport layer and passed explicitly to everything
/// that needs the caller's identity.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Raw cookie value, if the request carried one.
    pub session_id: Option<String>,
    pub validation: SessionValidation,
}

impl RequestContext {
    pub fn authorize(&self) -> Result<AuthContext, AuthError> {
        authorize(&self.validation)
    }
}

/// A resolved request: who is calling, and which cookie to send back.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub context: RequestContext,
    pub cookie: CookieDirective,
}

/// Fails closed: anything short of a session with its user is rejected.
pub fn authorize(validation: &SessionValidation) -> Result<AuthContext, AuthError> {
    match (&validation.session, &validation.user) {
        (Some(session), Some(user)) => Ok(AuthContext {
            session: session.clone(),
            user: user.clone(),
        }),
        _ => Err(AuthError::Unauthenticated),
    }
}
