//! Server-side sessions.
//!
//! [`SessionManager`] issues, validates, extends and invalidates sessions.
//! The gate turns a validation into an [`AuthContext`] or `Unauthenticated`,
//! and the cookie codec renders the `Set-Cookie` side of each request.

mod config;
mod cookie;
mod gate;
mod manager;

pub use config::{RotationFailurePolicy, SameSite, SessionConfig};
pub use cookie::{CookieAttributes, CookieDirective, SessionCookie, read_cookie};
pub use gate::{AuthContext, RequestContext, Resolution, SessionValidation, authorize};
pub use manager::SessionManager;
