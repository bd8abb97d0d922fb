use async_trait::async_trait;

use super::AuthEvent;

/// Receives every dispatched [`AuthEvent`].
///
/// Handlers run inline with the request that fired the event, so keep them
/// short or hand work off to a task.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &AuthEvent);
}
