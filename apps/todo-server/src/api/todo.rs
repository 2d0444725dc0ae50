//! Todo API endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use entities::{NewTodo, Todo, TodoPatch};
use serde::{Deserialize, Serialize};
use todo_store::{TodoFilter, TodoStore};

use crate::error::{ServerError, ServerResult};
use crate::state::SharedState;

/// Query parameters for listing todos.
#[derive(Debug, Default)]
pub struct ListTodosQuery {
    /// `"true"` selects completed todos; any other value selects open ones.
    pub completed: Option<String>,
}

impl ListTodosQuery {
    /// Builds the query from raw key/value pairs. The first `completed` wins
    /// when the key repeats.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            completed: pairs
                .into_iter()
                .find(|(key, _)| key == "completed")
                .map(|(_, value)| value),
        }
    }

    fn filter(&self) -> TodoFilter {
        match self.completed.as_deref() {
            Some(value) => TodoFilter::new().with_completed(value == "true"),
            None => TodoFilter::new(),
        }
    }
}

/// Request body for creating a todo.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    pub task: Option<String>,
    pub priority: Option<String>,
}

impl From<CreateTodoRequest> for NewTodo {
    fn from(request: CreateTodoRequest) -> Self {
        let new = NewTodo::new(request.task.unwrap_or_default());
        match request.priority {
            Some(priority) => new.with_priority(priority),
            None => new,
        }
    }
}

/// Plain status message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_id(raw: &str) -> ServerResult<i64> {
    raw.parse().map_err(|_| ServerError::todo_not_found())
}

/// Parses an update body. A missing or empty body is an empty patch.
fn patch_body(body: &Bytes) -> ServerResult<TodoPatch> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TodoPatch::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        ServerError::InvalidRequest(format!("Failed to parse the request body as JSON: {e}"))
    })
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ServerResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ServerError::InvalidRequest(rejection.body_text()))
}

/// Lists todos, optionally filtered by completion.
pub async fn list_todos<S: TodoStore>(
    State(state): State<SharedState<S>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ServerResult<Json<Vec<Todo>>> {
    let query = ListTodosQuery::from_pairs(pairs);
    let todos = state.store.list_todos(query.filter()).await?;
    Ok(Json(todos))
}

/// Creates a todo.
pub async fn create_todo<S: TodoStore>(
    State(state): State<SharedState<S>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Todo>)> {
    let request = json_body(payload)?;

    let todo = state.store.create_todo(request.into()).await?;

    tracing::info!(todo_id = todo.id, "Todo created");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// Applies a partial update to a todo.
pub async fn update_todo<S: TodoStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ServerResult<Json<Todo>> {
    let id = parse_id(&id)?;
    let patch = patch_body(&body)?;

    let todo = state.store.update_todo(id, patch).await?;

    tracing::info!(todo_id = id, completed = todo.completed, "Todo updated");

    Ok(Json(todo))
}

/// Marks every todo as completed.
pub async fn complete_all_todos<S: TodoStore>(
    State(state): State<SharedState<S>>,
) -> ServerResult<Json<MessageResponse>> {
    let count = state.store.complete_all_todos().await?;

    tracing::info!(count, "All todos marked as completed");

    Ok(Json(MessageResponse {
        message: "All to-do items marked as completed".to_string(),
    }))
}

/// Deletes a todo.
pub async fn delete_todo<S: TodoStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let id = parse_id(&id)?;

    state.store.delete_todo(id).await?;

    tracing::info!(todo_id = id, "Todo deleted");

    Ok(StatusCode::NO_CONTENT)
}
