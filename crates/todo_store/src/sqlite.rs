//! SQLite-backed todo store.

use std::str::FromStr;

use async_trait::async_trait;
use entities::{NewTodo, Todo, TodoPatch, DEFAULT_PRIORITY};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, SqlitePool,
};

use crate::{traits::ensure_task, TodoFilter, TodoStore, TodoStoreError, TodoStoreResult};

/// Table definition, safe to run on every startup.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task TEXT NOT NULL,
    completed BOOLEAN DEFAULT 0,
    priority TEXT DEFAULT 'medium'
)
"#;

/// Database row for Todo
#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    task: String,
    completed: Option<bool>,
    priority: Option<String>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            task: row.task,
            completed: row.completed.unwrap_or(false),
            priority: row
                .priority
                .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        }
    }
}

/// Todo store persisted in a single SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    /// Opens (creating if missing) the database at `database_url` and ensures
    /// the schema exists.
    pub async fn connect(database_url: &str) -> TodoStoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Creates a store backed by a private in-memory database.
    ///
    /// The pool holds exactly one connection that is never recycled, since
    /// every SQLite `:memory:` connection is its own database.
    pub async fn in_memory() -> TodoStoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, creating the schema if needed.
    pub async fn from_pool(pool: SqlitePool) -> TodoStoreResult<Self> {
        sqlx::query(SCHEMA_SQL).execute(&pool).await?;
        tracing::debug!("Todo schema ready");
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn list_todos(&self, filter: TodoFilter) -> TodoStoreResult<Vec<Todo>> {
        let rows: Vec<TodoRow> = match filter.completed {
            Some(completed) => {
                sqlx::query_as(
                    "SELECT id, task, completed, priority FROM todos WHERE completed = ? ORDER \
                     BY id",
                )
                .bind(completed)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT id, task, completed, priority FROM todos ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn create_todo(&self, new: NewTodo) -> TodoStoreResult<Todo> {
        ensure_task(&new)?;

        let row: TodoRow = sqlx::query_as(
            "INSERT INTO todos (task, completed, priority) VALUES (?, 0, ?) RETURNING id, task, \
             completed, priority",
        )
        .bind(new.task)
        .bind(new.priority)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_todo(&self, id: i64, patch: TodoPatch) -> TodoStoreResult<Todo> {
        let patch = patch.normalized();

        let row: Option<TodoRow> = sqlx::query_as(
            "UPDATE todos SET task = COALESCE(?, task), completed = COALESCE(?, completed), \
             priority = COALESCE(?, priority) WHERE id = ? RETURNING id, task, completed, \
             priority",
        )
        .bind(patch.task)
        .bind(patch.completed)
        .bind(patch.priority)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Todo::from)
            .ok_or_else(|| TodoStoreError::not_found(id))
    }

    async fn complete_all_todos(&self) -> TodoStoreResult<u64> {
        let result = sqlx::query("UPDATE todos SET completed = 1")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_todo(&self, id: i64) -> TodoStoreResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TodoStoreError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::{assert_err, assert_ok};

    use super::*;

    async fn store() -> SqliteTodoStore {
        SqliteTodoStore::in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_sqlite_store_create_and_list() {
        let store = store().await;

        let todo = assert_ok!(store.create_todo(NewTodo::new("Buy milk")).await);
        assert_eq!(todo.task, "Buy milk");
        assert!(!todo.completed);
        assert_eq!(todo.priority, "medium");

        let high = store
            .create_todo(NewTodo::new("Pay rent").with_priority("high"))
            .await
            .unwrap();
        assert_eq!(high.priority, "high");
        assert!(high.id > todo.id);

        let todos = store.list_todos(TodoFilter::new()).await.unwrap();
        assert_eq!(todos, vec![todo, high]);
    }

    #[tokio::test]
    async fn test_sqlite_store_rejects_empty_task() {
        let store = store().await;

        let err = assert_err!(store.create_todo(NewTodo::new("")).await);
        assert!(matches!(err, TodoStoreError::Validation(_)));
        assert!(store.list_todos(TodoFilter::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_store_filter() {
        let store = store().await;
        let first = store.create_todo(NewTodo::new("Task 1")).await.unwrap();
        let second = store.create_todo(NewTodo::new("Task 2")).await.unwrap();
        store
            .update_todo(first.id, TodoPatch::new().with_completed(true))
            .await
            .unwrap();

        let done = store
            .list_todos(TodoFilter::new().with_completed(true))
            .await
            .unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, first.id);
        assert!(done[0].completed);

        let open = store
            .list_todos(TodoFilter::new().with_completed(false))
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second.id);
    }

    #[tokio::test]
    async fn test_sqlite_store_update_coalesces_missing_fields() {
        let store = store().await;
        let todo = store
            .create_todo(NewTodo::new("Buy milk").with_priority("low"))
            .await
            .unwrap();

        let updated = store
            .update_todo(todo.id, TodoPatch::new().with_completed(true).with_task(""))
            .await
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.task, "Buy milk");
        assert_eq!(updated.priority, "low");

        let updated = store
            .update_todo(
                todo.id,
                TodoPatch::new().with_completed(false).with_task("Buy oat milk"),
            )
            .await
            .unwrap();
        assert!(!updated.completed);
        assert_eq!(updated.task, "Buy oat milk");
    }

    #[tokio::test]
    async fn test_sqlite_store_update_unknown() {
        let store = store().await;
        let todo = store.create_todo(NewTodo::new("a")).await.unwrap();

        let err = assert_err!(
            store
                .update_todo(todo.id + 100, TodoPatch::new().with_completed(true))
                .await
        );
        assert!(matches!(err, TodoStoreError::NotFound { .. }));

        let todos = store.list_todos(TodoFilter::new()).await.unwrap();
        assert_eq!(todos, vec![todo]);
    }

    #[tokio::test]
    async fn test_sqlite_store_complete_all() {
        let store = store().await;
        for task in ["a", "b", "c"] {
            store.create_todo(NewTodo::new(task)).await.unwrap();
        }
        store
            .update_todo(2, TodoPatch::new().with_completed(true))
            .await
            .unwrap();

        let touched = store.complete_all_todos().await.unwrap();
        assert_eq!(touched, 3);

        let todos = store.list_todos(TodoFilter::new()).await.unwrap();
        assert!(todos.iter().all(|t| t.completed));
    }

    #[tokio::test]
    async fn test_sqlite_store_delete() {
        let store = store().await;
        let a = store.create_todo(NewTodo::new("a")).await.unwrap();
        let b = store.create_todo(NewTodo::new("b")).await.unwrap();

        assert_ok!(store.delete_todo(a.id).await);
        assert_eq!(store.list_todos(TodoFilter::new()).await.unwrap(), vec![b]);

        let err = assert_err!(store.delete_todo(a.id).await);
        assert!(matches!(err, TodoStoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_sqlite_store_does_not_reuse_ids() {
        let store = store().await;
        store.create_todo(NewTodo::new("a")).await.unwrap();
        let b = store.create_todo(NewTodo::new("b")).await.unwrap();
        store.delete_todo(b.id).await.unwrap();

        let c = store.create_todo(NewTodo::new("c")).await.unwrap();
        assert!(c.id > b.id);
    }

    #[tokio::test]
    async fn test_sqlite_store_persists_to_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let url = format!("sqlite://{}", temp_dir.path().join("todos.db").display());

        let store = SqliteTodoStore::connect(&url).await.unwrap();
        let todo = store.create_todo(NewTodo::new("Persist me")).await.unwrap();
        store.pool().close().await;

        // Reopening runs the schema again and keeps existing rows.
        let reopened = SqliteTodoStore::connect(&url).await.unwrap();
        let todos = reopened.list_todos(TodoFilter::new()).await.unwrap();
        assert_eq!(todos, vec![todo]);
    }
}
