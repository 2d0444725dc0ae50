//! Application state.

use std::sync::Arc;

use todo_store::TodoStore;

/// Shared application state.
pub struct AppState<S: TodoStore> {
    /// Todo store.
    pub store: S,
}

impl<S: TodoStore> AppState<S> {
    /// Creates new application state.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from a store.
pub fn create_shared_state<S: TodoStore>(store: S) -> SharedState<S> {
    Arc::new(AppState::new(store))
}
