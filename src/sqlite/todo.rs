use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::storage_error;
use crate::AuthError;
use crate::todos::{Todo, TodoFilter, TodoRepository};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TodoRecord {
    id: String,
    user_id: String,
    title: String,
    description: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TodoRecord> for Todo {
    fn from(row: TodoRecord) -> Self {
        Todo {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const TODO_COLUMNS: &str = "id, user_id, title, description, completed, created_at, updated_at";

/// Escapes `LIKE` wildcards so user input matches literally.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    async fn create_todo(&self, todo: &Todo) -> Result<(), AuthError> {
        sqlx::query(
            "INSERT INTO todos (id, user_id, title, description, completed, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&todo.id)
        .bind(&todo.user_id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("create_todo", &e))?;

        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_todo(&self, user_id: &str, id: &str) -> Result<Option<Todo>, AuthError> {
        let row: Option<TodoRecord> = sqlx::query_as(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("find_todo", &e))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list_todos(
        &self,
        filter: &TodoFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Todo>, AuthError> {
        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {TODO_COLUMNS} FROM todos WHERE user_id = "));
        query.push_bind(&filter.user_id);

        if let Some(completed) = filter.completed {
            query.push(" AND completed = ").push_bind(completed);
        }
        if let Some((start, end)) = filter.created_between {
            query
                .push(" AND created_at >= ")
                .push_bind(start)
                .push(" AND created_at < ")
                .push_bind(end);
        }
        if let Some(needle) = &filter.title_contains {
            query
                .push(" AND title LIKE ")
                .push_bind(like_pattern(needle))
                .push(" ESCAPE '\\'");
        }

        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let rows: Vec<TodoRecord> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list_todos", &e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    async fn update_todo(&self, todo: &Todo) -> Result<bool, AuthError> {
        let result = sqlx::query(
            "UPDATE todos SET title = ?, completed = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(todo.updated_at)
        .bind(&todo.id)
        .bind(&todo.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("update_todo", &e))?;

        Ok(result.rows_affected() > 0)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn delete_todo(&self, user_id: &str, id: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete_todo", &e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("milk"), "%milk%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
