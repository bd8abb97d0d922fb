use chrono::Utc;

use crate::crypto::is_well_formed_id;
use crate::events::{AuthEvent, dispatch};
use crate::session::SessionManager;
use crate::{AuthError, SessionRepository, UserRepository};

pub struct SignoutAction<S, U> {
    manager: SessionManager<S, U>,
}

impl<S: SessionRepository, U: UserRepository> SignoutAction<S, U> {
    pub fn new(manager: SessionManager<S, U>) -> Self {
        Self { manager }
    }

    /// Invalidates the caller's session. Signing out without a session, or
    /// twice, succeeds.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "signout", skip_all, err))]
    pub async fn execute(&self, session_id: &str) -> Result<(), AuthError> {
        if !is_well_formed_id(session_id) {
            return Ok(());
        }

        let session = self.manager.sessions().find_session(session_id).await?;
        self.manager.invalidate_session(session_id).await?;

        if let Some(session) = session {
            dispatch(AuthEvent::SignedOut {
                user_id: session.user_id,
                at: Utc::now(),
            })
            .await;
        }

        log::info!(target: "tessera", "msg=\"signout success\"");

        Ok(())
    }
}
