//! API endpoints.

pub mod todo;

use axum::{
    Router,
    routing::{get, put},
};
use todo_store::TodoStore;

use crate::state::SharedState;

/// Creates the API router with all endpoints.
pub fn create_router<S: TodoStore + 'static>() -> Router<SharedState<S>> {
    Router::new()
        .route("/todos", get(todo::list_todos).post(todo::create_todo))
        // Matched ahead of `/todos/:id`.
        .route("/todos/complete-all", put(todo::complete_all_todos))
        .route(
            "/todos/:id",
            put(todo::update_todo).delete(todo::delete_todo),
        )
}
