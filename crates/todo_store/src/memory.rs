//! In-memory todo store implementation.

use std::sync::Arc;

use async_trait::async_trait;
use entities::{NewTodo, Todo, TodoPatch};
use tokio::sync::RwLock;

use crate::{traits::ensure_task, TodoFilter, TodoStore, TodoStoreError, TodoStoreResult};

#[derive(Debug, Default)]
struct TodoList {
    todos: Vec<Todo>,
    /// Highest id handed out so far. Never decreases, so deleted ids are not
    /// reused.
    last_id: i64,
}

impl TodoList {
    fn insert(&mut self, new: NewTodo) -> Todo {
        self.last_id += 1;
        let todo = Todo::new(self.last_id, new);
        self.todos.push(todo.clone());
        todo
    }
}

/// Process-local todo store backed by an ordered list.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    list: Arc<RwLock<TodoList>>,
}

impl MemoryTodoStore {
    /// Creates an empty in-memory todo store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with two sample todos.
    pub fn with_sample_data() -> Self {
        let mut list = TodoList::default();
        list.insert(NewTodo::new("Learn Rust"));
        list.insert(NewTodo::new("Build a REST API"));

        Self {
            list: Arc::new(RwLock::new(list)),
        }
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list_todos(&self, filter: TodoFilter) -> TodoStoreResult<Vec<Todo>> {
        let list = self.list.read().await;
        Ok(list
            .todos
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    async fn create_todo(&self, new: NewTodo) -> TodoStoreResult<Todo> {
        ensure_task(&new)?;
        let mut list = self.list.write().await;
        Ok(list.insert(new))
    }

    async fn update_todo(&self, id: i64, patch: TodoPatch) -> TodoStoreResult<Todo> {
        let mut list = self.list.write().await;
        let todo = list
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoStoreError::not_found(id))?;
        todo.apply(&patch);
        Ok(todo.clone())
    }

    async fn complete_all_todos(&self) -> TodoStoreResult<u64> {
        let mut list = self.list.write().await;
        for todo in list.todos.iter_mut() {
            todo.completed = true;
        }
        Ok(list.todos.len() as u64)
    }

    async fn delete_todo(&self, id: i64) -> TodoStoreResult<()> {
        let mut list = self.list.write().await;
        let index = list
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TodoStoreError::not_found(id))?;
        list.todos.remove(index);
        Ok(())
    }
}
