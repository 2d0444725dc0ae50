//! Todo entity definitions.

use serde::{Deserialize, Serialize};

/// Priority assigned to a todo when none is supplied.
pub const DEFAULT_PRIORITY: &str = "medium";

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    /// Unique identifier, assigned by the store.
    pub id: i64,
    /// What needs doing.
    pub task: String,
    /// Whether the item is done.
    pub completed: bool,
    /// Free-form priority label.
    pub priority: String,
}

impl Todo {
    /// Creates a new, not yet completed todo with the given id.
    pub fn new(id: i64, new: NewTodo) -> Self {
        Self {
            id,
            task: new.task,
            completed: false,
            priority: new.priority,
        }
    }

    /// Overwrites the fields present in `patch`, keeping the rest.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(task) = non_blank(&patch.task) {
            self.task = task.to_string();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = non_blank(&patch.priority) {
            self.priority = priority.to_string();
        }
    }
}

/// Payload for creating a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    /// Task text. Must not be empty.
    pub task: String,
    /// Priority label.
    pub priority: String,
}

impl NewTodo {
    /// Creates a payload with the default priority.
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Returns true if the task text is present.
    pub fn has_task(&self) -> bool {
        !self.task.is_empty()
    }
}

/// Partial update for a todo. Absent fields are left untouched.
///
/// Empty strings for `task` and `priority` count as absent, so an update can
/// never blank out either field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TodoPatch {
    /// New task text.
    pub task: Option<String>,
    /// New completion flag.
    pub completed: Option<bool>,
    /// New priority label.
    pub priority: Option<String>,
}

impl TodoPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task text.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Sets the completion flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the priority label.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Drops blank string fields so they behave as absent.
    pub fn normalized(self) -> Self {
        Self {
            task: self.task.filter(|t| !t.is_empty()),
            completed: self.completed,
            priority: self.priority.filter(|p| !p.is_empty()),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
