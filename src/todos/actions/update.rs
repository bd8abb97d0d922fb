use chrono::Utc;

use crate::todos::{Todo, TodoRepository, TodoUpdate};
use crate::validators::validate_title;
use crate::{AuthContext, AuthError};

pub struct UpdateTodoAction<T> {
    todo_repository: T,
}

impl<T: TodoRepository> UpdateTodoAction<T> {
    pub fn new(todo_repository: T) -> Self {
        Self { todo_repository }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "update_todo", skip_all, err))]
    pub async fn execute(
        &self,
        ctx: &AuthContext,
        id: &str,
        update: &TodoUpdate,
    ) -> Result<Todo, AuthError> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }

        let mut todo = self
            .todo_repository
            .find_todo(ctx.user_id(), id)
            .await?
            .ok_or(AuthError::NotFound)?;

        if let Some(title) = &update.title {
            title.trim().clone_into(&mut todo.title);
        }
        if let Some(completed) = update.completed {
            todo.completed = completed;
        }
        todo.updated_at = Utc::now();

        // deleted between the read and the write
        if !self.todo_repository.update_todo(&todo).await? {
            return Err(AuthError::NotFound);
        }

        Ok(todo)
    }
}
