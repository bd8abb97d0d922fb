use chrono::{DateTime, Utc};

/// Events emitted by the session core and the credential actions.
///
/// Dispatch is a no-op until listeners are registered via
/// [`register_event_listeners`](crate::register_event_listeners).
#[derive(Debug, Clone)]
pub enum AuthEvent {
    UserRegistered {
        user_id: String,
        username: String,
        at: DateTime<Utc>,
    },

    // credentials
    LoginSuccess {
        user_id: String,
        username: String,
        at: DateTime<Utc>,
    },
    LoginFailed {
        username: String,
        reason: String,
        at: DateTime<Utc>,
    },
    SignedOut {
        user_id: String,
        at: DateTime<Utc>,
    },

    // session lifecycle
    SessionCreated {
        user_id: String,
        at: DateTime<Utc>,
    },
    SessionRefreshed {
        user_id: String,
        expires_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    SessionExpired {
        user_id: String,
        at: DateTime<Utc>,
    },
    SessionsRevoked {
        user_id: String,
        count: u64,
        at: DateTime<Utc>,
    },
}

impl AuthEvent {
    /// Dot-separated event name for logs and spans.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user.registered",
            Self::LoginSuccess { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::SignedOut { .. } => "auth.signout",
            Self::SessionCreated { .. } => "session.created",
            Self::SessionRefreshed { .. } => "session.refreshed",
            Self::SessionExpired { .. } => "session.expired",
            Self::SessionsRevoked { .. } => "session.revoked_all",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::UserRegistered { at, .. }
            | Self::LoginSuccess { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::SignedOut { at, .. }
            | Self::SessionCreated { at, .. }
            | Self::SessionRefreshed { at, .. }
            | Self::SessionExpired { at, .. }
            | Self::SessionsRevoked { at, .. } => *at,
        }
    }
}
