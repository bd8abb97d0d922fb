use async_trait::async_trait;

use crate::events::{AuthEvent, Listener};

/// Emits each event as a `tracing` event at INFO.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &AuthEvent) {
        tracing::info!(
            target: "tessera::events",
            event_name = event.name(),
            ?event,
            "session event"
        );
    }
}
