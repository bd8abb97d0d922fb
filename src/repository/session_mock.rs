#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::AuthError;

use super::session::{Session, SessionRepository};

/// In-memory session storage.
///
/// `fail_updates` makes every expiry update fail, which is how tests exercise
/// the rotation failure policy.
#[derive(Clone, Default)]
pub struct MockSessionRepository {
    pub sessions: Arc<Mutex<HashMap<String, Session>>>,
    pub fail_updates: Arc<AtomicBool>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a row directly, bypassing the session manager.
    pub fn insert(&self, session: Session) {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id.clone(), session);
    }

    pub fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.lock().unwrap().get(session_id).cloned()
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create_session(&self, session: &Session) -> Result<(), AuthError> {
        self.insert(session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: &str) -> Result<Option<Session>, AuthError> {
        Ok(self.get(session_id))
    }

    async fn update_session_expiry(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AuthError::StorageUnavailable(
                "session store is read-only".to_owned(),
            ));
        }

        if let Some(session) = self.sessions.lock().unwrap().get_mut(session_id) {
            session.expires_at = expires_at;
        }
        Ok(())
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), AuthError> {
        self.sessions.lock().unwrap().remove(session_id);
        Ok(())
    }

    async fn delete_user_sessions(&self, user_id: &str) -> Result<u64, AuthError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        let removed = before.saturating_sub(sessions.len());
        drop(sessions);

        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }

    async fn prune_expired(&self) -> Result<u64, AuthError> {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        let pruned = before.saturating_sub(sessions.len());
        drop(sessions);

        Ok(u64::try_from(pruned).unwrap_or(u64::MAX))
    }
}
