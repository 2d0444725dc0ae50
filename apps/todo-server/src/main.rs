//! Todo Server binary.

use todo_server::{
    config::{Config, StoreBackend},
    init_tracing, serve,
};
use todo_store::{MemoryTodoStore, SqliteTodoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!(store = %config.store_backend, "Starting todo server");

    match config.store_backend {
        StoreBackend::Memory => {
            let store = if config.seed_sample_data {
                MemoryTodoStore::with_sample_data()
            } else {
                MemoryTodoStore::new()
            };
            serve(config, store).await
        }
        StoreBackend::Sqlite => {
            let store = SqliteTodoStore::connect(&config.database_url).await?;
            tracing::info!(database_url = %config.database_url, "Connected to the SQLite database");
            serve(config, store).await
        }
    }
}
