use crate::todos::TodoRepository;
use crate::{AuthContext, AuthError};

pub struct DeleteTodoAction<T> {
    todo_repository: T,
}

impl<T: TodoRepository> DeleteTodoAction<T> {
    pub fn new(todo_repository: T) -> Self {
        Self { todo_repository }
    }

    /// Deleting a missing or foreign todo succeeds and changes nothing.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "delete_todo", skip_all, err))]
    pub async fn execute(&self, ctx: &AuthContext, id: &str) -> Result<(), AuthError> {
        self.todo_repository.delete_todo(ctx.user_id(), id).await
    }
}
