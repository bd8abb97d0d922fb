//! `SQLite` repositories (feature `sqlx_sqlite`).
//!
//! Run [`migrations::run`] once against the pool before use.

pub mod migrations;
mod session;
mod todo;
mod user;

pub use session::SqliteSessionRepository;
use sqlx::SqlitePool;
pub use todo::SqliteTodoRepository;
pub use user::SqliteUserRepository;

use crate::AuthError;

/// All three repositories over one pool.
pub fn create_repositories(
    pool: SqlitePool,
) -> (
    SqliteUserRepository,
    SqliteSessionRepository,
    SqliteTodoRepository,
) {
    (
        SqliteUserRepository::new(pool.clone()),
        SqliteSessionRepository::new(pool.clone()),
        SqliteTodoRepository::new(pool),
    )
}

pub(crate) fn storage_error(operation: &str, e: &sqlx::Error) -> AuthError {
    log::error!(
        target: "tessera::sqlite",
        "msg=\"database error\" operation=\"{operation}\" error=\"{e}\""
    );
    AuthError::StorageUnavailable(e.to_string())
}
