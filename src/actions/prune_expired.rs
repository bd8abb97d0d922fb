//! Run periodically to keep the sessions table from growing without bound.
//! Expired sessions are already rejected and reaped on read; this only
//! reclaims rows nobody asks for again.

use crate::{AuthError, SessionRepository};

pub struct PruneExpiredSessionsAction<S> {
    sessions: S,
}

impl<S: SessionRepository> PruneExpiredSessionsAction<S> {
    pub fn new(sessions: S) -> Self {
        Self { sessions }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), name = "prune_expired")
    )]
    pub async fn execute(&self) -> Result<u64, AuthError> {
        let pruned = self.sessions.prune_expired().await?;

        log::info!(
            target: "tessera",
            "msg=\"sessions pruned\" count={pruned}"
        );

        Ok(pruned)
    }
}
