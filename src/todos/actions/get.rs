use crate::todos::{Todo, TodoRepository};
use crate::{AuthContext, AuthError};

pub struct GetTodoAction<T> {
    todo_repository: T,
}

impl<T: TodoRepository> GetTodoAction<T> {
    pub fn new(todo_repository: T) -> Self {
        Self { todo_repository }
    }

    /// `NotFound` covers both a missing todo and someone else's.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "get_todo", skip_all, err))]
    pub async fn execute(&self, ctx: &AuthContext, id: &str) -> Result<Todo, AuthError> {
        self.todo_repository
            .find_todo(ctx.user_id(), id)
            .await?
            .ok_or(AuthError::NotFound)
    }
}
