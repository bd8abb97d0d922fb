use chrono::Utc;

use crate::todos::{TodoPage, TodoQuery, TodoRepository};
use crate::{AuthContext, AuthError};

pub const ITEMS_PER_PAGE: u64 = 10;

pub struct ListTodosAction<T> {
    todo_repository: T,
}

impl<T: TodoRepository> ListTodosAction<T> {
    pub fn new(todo_repository: T) -> Self {
        Self { todo_repository }
    }

    /// One page of the caller's todos, newest first.
    ///
    /// Fetches one row past the page to learn whether another page exists,
    /// under the same filters as the page itself.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "list_todos", skip_all, err))]
    pub async fn execute(
        &self,
        ctx: &AuthContext,
        query: &TodoQuery,
    ) -> Result<TodoPage, AuthError> {
        let filter = query.filter_for(ctx.user_id(), Utc::now());

        let mut todos = self
            .todo_repository
            .list_todos(&filter, query.cursor, ITEMS_PER_PAGE + 1)
            .await?;

        let has_more = todos.len() as u64 > ITEMS_PER_PAGE;
        todos.truncate(usize::try_from(ITEMS_PER_PAGE).unwrap_or(usize::MAX));

        Ok(TodoPage {
            todos,
            has_more,
            items_per_page: ITEMS_PER_PAGE,
        })
    }
}
