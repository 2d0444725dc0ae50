//! Server configuration.

use std::{env, fmt};

/// Default port the server listens on.
pub const DEFAULT_PORT: u16 = 3000;

/// Default SQLite database, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:todos.db?mode=rwc";

/// Storage backend serving the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local list, lost on restart.
    #[default]
    Memory,
    /// Single-file SQLite database.
    Sqlite,
}

impl StoreBackend {
    /// Converts the backend to its configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
        }
    }

    /// Parses a backend from its configuration name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Which store backs the API.
    pub store_backend: StoreBackend,
    /// Database URL (sqlite backend only).
    pub database_url: String,
    /// Whether to seed the memory store with sample todos.
    pub seed_sample_data: bool,
    /// Log level.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            store_backend: StoreBackend::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            seed_sample_data: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let store_backend = match lookup("TODO_STORE") {
            Some(name) => StoreBackend::parse(&name).ok_or_else(|| {
                anyhow::anyhow!("TODO_STORE must be \"memory\" or \"sqlite\", got {name:?}")
            })?,
            None => defaults.store_backend,
        };

        Ok(Self {
            host: lookup("TODO_SERVER_HOST").unwrap_or(defaults.host),
            port: lookup("TODO_SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            store_backend,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            seed_sample_data: lookup("TODO_SEED_SAMPLE_DATA")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.seed_sample_data),
            log_level: lookup("TODO_LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
