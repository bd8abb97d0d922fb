use chrono::Utc;
use uuid::Uuid;

use crate::todos::{Todo, TodoRepository};
use crate::validators::validate_title;
use crate::{AuthContext, AuthError};

pub struct CreateTodoAction<T> {
    todo_repository: T,
}

impl<T: TodoRepository> CreateTodoAction<T> {
    pub fn new(todo_repository: T) -> Self {
        Self { todo_repository }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "create_todo", skip_all, err))]
    pub async fn execute(
        &self,
        ctx: &AuthContext,
        title: &str,
        completed: bool,
    ) -> Result<Todo, AuthError> {
        validate_title(title)?;

        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            user_id: ctx.user_id().to_owned(),
            title: title.trim().to_owned(),
            description: String::new(),
            completed,
            created_at: now,
            updated_at: now,
        };
        self.todo_repository.create_todo(&todo).await?;

        log::debug!(
            target: "tessera::todos",
            "msg=\"todo created\" user_id=\"{}\" todo_id=\"{}\"",
            todo.user_id,
            todo.id
        );

        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todos::MockTodoRepository;
    use crate::todos::actions::test_support::context;
    use crate::validators::ValidationError;

    #[tokio::test]
    async fn test_create_todo() {
        let repo = MockTodoRepository::new();
        let ctx = context();

        let todo = CreateTodoAction::new(repo.clone())
            .execute(&ctx, "  Buy milk ", false)
            .await
            .unwrap();

        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.user_id, ctx.user.id);
        assert_eq!(todo.description, "");
        assert!(!todo.completed);
        assert!(Uuid::parse_str(&todo.id).is_ok());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_create_todo_rejects_blank_title() {
        let repo = MockTodoRepository::new();
        let result = CreateTodoAction::new(repo.clone())
            .execute(&context(), "   ", false)
            .await;

        assert_eq!(
            result.unwrap_err(),
            AuthError::Validation(ValidationError::TitleEmpty)
        );
        assert!(repo.is_empty());
    }
}
