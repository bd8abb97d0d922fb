//! Per-user todos.
//!
//! Every action takes an [`AuthContext`](crate::AuthContext), so none of them
//! can run without a validated session, and every query is scoped to that
//! context's user.

mod actions;
mod query;
mod repository;
mod types;

pub use actions::{
    CreateTodoAction, DeleteTodoAction, GetTodoAction, ITEMS_PER_PAGE, ListTodosAction,
    UpdateTodoAction,
};
pub use query::{DateFilter, StatusFilter, TodoFilter, TodoQuery};
pub use repository::TodoRepository;
pub use types::{Todo, TodoPage, TodoUpdate};

#[cfg(any(test, feature = "mocks"))]
mod mocks;

#[cfg(any(test, feature = "mocks"))]
pub use mocks::MockTodoRepository;
