//! Event hooks for the session lifecycle and credential actions.
//!
//! Events fire from the session manager and the actions. With no listeners
//! registered, dispatch does nothing.
//!
//! ```rust,ignore
//! use tessera::register_event_listeners;
//! use tessera::events::listeners::LoggingListener;
//!
//! register_event_listeners(|registry| {
//!     registry.listen(LoggingListener::new());
//! });
//! ```
//!
//! Implement [`Listener`] for anything else, counting failed logins for
//! instance:
//!
//! ```rust,ignore
//! use tessera::events::{AuthEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct FailedLogins(std::sync::atomic::AtomicU64);
//!
//! #[async_trait]
//! impl Listener for FailedLogins {
//!     async fn handle(&self, event: &AuthEvent) {
//!         if let AuthEvent::LoginFailed { .. } = event {
//!             self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AuthEvent;
pub use listener::Listener;
pub use registry::{EventRegistry, dispatch, register_event_listeners};
