//! Embedded schema for the `SQLite` backend.
//!
//! ```rust,ignore
//! use tessera::sqlite::migrations;
//!
//! let pool = SqlitePool::connect("sqlite::memory:").await?;
//! migrations::run(&pool).await?;
//! ```

use sqlx::{Executor, SqlitePool};

const MIGRATIONS: &[(&str, &str)] = &[
    (
        "20250101000001_create_users_table",
        include_str!("../../migrations_sqlite/20250101000001_create_users_table.sql"),
    ),
    (
        "20250101000002_create_sessions_table",
        include_str!("../../migrations_sqlite/20250101000002_create_sessions_table.sql"),
    ),
    (
        "20250101000003_create_todos_table",
        include_str!("../../migrations_sqlite/20250101000003_create_todos_table.sql"),
    ),
];

/// Applies every migration not yet recorded in `_tessera_migrations`, in order.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(
        r"
        CREATE TABLE IF NOT EXISTS _tessera_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        ",
    )
    .await?;

    for (name, sql) in MIGRATIONS {
        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _tessera_migrations WHERE name = ?)")
                .bind(*name)
                .fetch_one(pool)
                .await?;

        if applied {
            continue;
        }

        // one statement per execute; the bundled files keep `;` out of literals
        for statement in sql.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                pool.execute(trimmed).await?;
            }
        }

        sqlx::query("INSERT INTO _tessera_migrations (name) VALUES (?)")
            .bind(*name)
            .execute(pool)
            .await?;

        log::info!(target: "tessera::sqlite", "msg=\"migration applied\" name=\"{name}\"");
    }

    Ok(())
}
