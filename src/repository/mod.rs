//! Storage traits and record types.
//!
//! The session core talks to storage only through these traits, so any
//! backend that can satisfy them is substitutable.
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`UserRepository`] | User lookup and insertion |
//! | [`SessionRepository`] | Session rows: insert, lookup, extend, delete |
//!
//! Enable the `mocks` feature for in-memory implementations:
//!
//! - [`MockUserRepository`]
//! - [`MockSessionRepository`]

mod session;
mod user;

#[cfg(any(test, feature = "mocks"))]
mod session_mock;
#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use session::{Session, SessionRepository};
pub use user::{User, UserRepository};

#[cfg(any(test, feature = "mocks"))]
pub use session_mock::MockSessionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
