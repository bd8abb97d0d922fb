#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::query::TodoFilter;
use super::repository::TodoRepository;
use super::types::Todo;
use crate::AuthError;

#[derive(Clone, Default)]
pub struct MockTodoRepository {
    pub todos: Arc<Mutex<Vec<Todo>>>,
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.todos.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn create_todo(&self, todo: &Todo) -> Result<(), AuthError> {
        self.todos.lock().unwrap().push(todo.clone());
        Ok(())
    }

    async fn find_todo(&self, user_id: &str, id: &str) -> Result<Option<Todo>, AuthError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .cloned())
    }

    async fn list_todos(
        &self,
        filter: &TodoFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Todo>, AuthError> {
        let mut matching: Vec<Todo> = self
            .todos
            .lock()
            .unwrap()
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn update_todo(&self, todo: &Todo) -> Result<bool, AuthError> {
        let mut todos = self.todos.lock().unwrap();
        let Some(existing) = todos
            .iter_mut()
            .find(|t| t.id == todo.id && t.user_id == todo.user_id)
        else {
            return Ok(false);
        };
        existing.title.clone_from(&todo.title);
        existing.completed = todo.completed;
        existing.updated_at = todo.updated_at;
        drop(todos);

        Ok(true)
    }

    async fn delete_todo(&self, user_id: &str, id: &str) -> Result<(), AuthError> {
        self.todos
            .lock()
            .unwrap()
            .retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(())
    }
}
