use async_trait::async_trait;

use crate::events::{AuthEvent, Listener};

/// Writes each event through the `log` facade.
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &AuthEvent) {
        log::log!(
            target: "tessera::events",
            self.level,
            "event={} {:?}",
            event.name(),
            event
        );
    }
}
