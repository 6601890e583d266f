// In-memory todo storage shared through AppState

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A single todo item as stored and as serialized to clients.
#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    pub id: Uuid,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Process-local todo storage.
///
/// Todos are kept in insertion order so listings match creation order.
/// Cloning the store clones the handle, not the data.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all todos in creation order.
    pub async fn list(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    /// Creates a todo with a fresh id and returns it.
    pub async fn create(&self, content: String) -> Todo {
        let todo: Todo = Todo {
            id: Uuid::new_v4(),
            content,
            completed: false,
            created_at: Utc::now(),
        };

        self.todos.write().await.push(todo.clone());
        todo
    }

    /// Flips the `completed` flag of the todo with `id` and returns the
    /// updated item, or `None` if no such todo exists.
    pub async fn toggle(&self, id: Uuid) -> Option<Todo> {
        let mut todos = self.todos.write().await;

        let todo: &mut Todo = todos.iter_mut().find(|t| t.id == id)?;
        todo.completed = !todo.completed;
        Some(todo.clone())
    }

    /// Removes the todo with `id`. Returns whether anything was removed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut todos = self.todos.write().await;

        let before: usize = todos.len();
        todos.retain(|t| t.id != id);
        todos.len() != before
    }
}
