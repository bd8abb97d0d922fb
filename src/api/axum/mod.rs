//! Axum integration: session middleware, the [`Authenticated`] extractor and
//! the `/auth` and `/todos` routes.
//!
//! ```rust,ignore
//! use tessera::api::axum::{AppState, router};
//!
//! let (users, sessions, todos) = tessera::sqlite::create_repositories(pool);
//! let app = router(AppState::new(sessions, users, todos, TesseraConfig::production()));
//! ```

mod error;
mod handlers;
mod middleware;
mod routes;

pub use error::AppError;
pub use middleware::{Authenticated, session_cookie_value, session_middleware};
pub use routes::{AppState, auth_routes, router, todo_routes};
