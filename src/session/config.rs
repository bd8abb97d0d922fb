use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

/// What to do when extending a fresh session fails.
///
/// The session is still valid when this happens; only its renewal failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationFailurePolicy {
    /// Log a warning and serve the request with the unrenewed session.
    #[default]
    LogAndContinue,
    /// Fail the request with the storage error.
    Reject,
}

/// Session lifetime and cookie policy.
///
/// Rotation keeps the session id and moves `expires_at` to
/// `min(now + session_lifetime, created_at + max_lifetime)`. A session is due
/// for rotation once less than `rotation_threshold` remains and the move would
/// actually push the expiry forward.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// With `false` the cookie carries no `Max-Age` and lives as long as the
    /// browser session. With `true`, `Max-Age` equals `session_lifetime`.
    pub persistent_cookie: bool,
    pub session_lifetime: Duration,
    pub rotation_threshold: Duration,
    pub max_lifetime: Duration,
    pub rotation_failure: RotationFailurePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            persistent_cookie: false,
            session_lifetime: Duration::days(30),
            rotation_threshold: Duration::days(15),
            max_lifetime: Duration::days(90),
            rotation_failure: RotationFailurePolicy::LogAndContinue,
        }
    }
}

impl SessionConfig {
    /// Defaults with `Secure` off, for plain-http local servers.
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.cookie_name.is_empty() {
            return Err("cookie_name must not be empty");
        }
        if self.session_lifetime <= Duration::zero() {
            return Err("session_lifetime must be positive");
        }
        if self.rotation_threshold <= Duration::zero()
            || self.rotation_threshold >= self.session_lifetime
        {
            return Err("rotation_threshold must be positive and below session_lifetime");
        }
        if self.max_lifetime < self.session_lifetime {
            return Err("max_lifetime must be at least session_lifetime");
        }
        Ok(())
    }
}
