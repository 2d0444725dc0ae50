//! Todo store trait definitions.

use async_trait::async_trait;
use entities::{NewTodo, Todo, TodoPatch};

use crate::{TodoStoreError, TodoStoreResult, TASK_REQUIRED};

/// Filter options for listing todos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Only return todos whose completion flag matches.
    pub completed: Option<bool>,
}

impl TodoFilter {
    /// Creates a filter that matches every todo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to a completion state.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns true if the todo passes this filter.
    pub fn matches(&self, todo: &Todo) -> bool {
        self.completed.is_none_or(|c| todo.completed == c)
    }
}

/// Trait for todo storage operations.
///
/// Every operation maps to a single store mutation or query; callers get no
/// atomicity across calls.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Lists todos in id order, optionally filtered.
    async fn list_todos(&self, filter: TodoFilter) -> TodoStoreResult<Vec<Todo>>;

    /// Creates a new todo. Fails with a validation error if the task is empty.
    async fn create_todo(&self, new: NewTodo) -> TodoStoreResult<Todo>;

    /// Applies a partial update and returns the updated todo.
    async fn update_todo(&self, id: i64, patch: TodoPatch) -> TodoStoreResult<Todo>;

    /// Marks every todo as completed. Returns the number of todos touched.
    async fn complete_all_todos(&self) -> TodoStoreResult<u64>;

    /// Deletes a todo.
    async fn delete_todo(&self, id: i64) -> TodoStoreResult<()>;
}

/// Rejects a create payload without task text.
pub(crate) fn ensure_task(new: &NewTodo) -> TodoStoreResult<()> {
    if new.has_task() {
        Ok(())
    } else {
        Err(TodoStoreError::validation(TASK_REQUIRED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        let mut todo = Todo::new(1, NewTodo::new("a"));

        assert!(TodoFilter::new().matches(&todo));
        assert!(TodoFilter::new().with_completed(false).matches(&todo));
        assert!(!TodoFilter::new().with_completed(true).matches(&todo));

        todo.completed = true;
        assert!(TodoFilter::new().with_completed(true).matches(&todo));
    }

    #[test]
    fn test_ensure_task() {
        assert!(ensure_task(&NewTodo::new("a")).is_ok());
        assert!(matches!(
            ensure_task(&NewTodo::new("")),
            Err(TodoStoreError::Validation(_))
        ));
    }
}
