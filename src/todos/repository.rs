use async_trait::async_trait;

use super::query::TodoFilter;
use super::types::Todo;
use crate::AuthError;

/// Todo storage. Every method is scoped by user id; a todo owned by someone
/// else is indistinguishable from one that does not exist.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn create_todo(&self, todo: &Todo) -> Result<(), AuthError>;

    async fn find_todo(&self, user_id: &str, id: &str) -> Result<Option<Todo>, AuthError>;

    /// Matching todos, newest first, skipping `offset` and returning at most
    /// `limit`.
    async fn list_todos(
        &self,
        filter: &TodoFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Todo>, AuthError>;

    /// Writes title, completion and `updated_at`. Returns whether a row owned
    /// by `todo.user_id` was updated.
    async fn update_todo(&self, todo: &Todo) -> Result<bool, AuthError>;

    async fn delete_todo(&self, user_id: &str, id: &str) -> Result<(), AuthError>;
}
