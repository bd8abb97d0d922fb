//! Credential procedures.
//!
//! Each action is a small struct built from its repositories and run with
//! `execute`. Signup and login return the new session; turning it into a
//! cookie is the transport's job via
//! [`SessionManager::create_session_cookie`](crate::SessionManager::create_session_cookie).

mod current_user;
mod login;
mod prune_expired;
mod signout;
mod signup;

pub use current_user::CurrentUserAction;
pub use login::LoginAction;
pub use prune_expired::PruneExpiredSessionsAction;
pub use signout::SignoutAction;
pub use signup::SignupAction;
