//! Todo storage for the todo server
//!
//! This crate provides a storage abstraction for todo records. It ships an
//! in-memory store (for tests and throwaway runs) and a SQLite store for
//! persistent single-file deployments.

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;

/// Re-exported so callers can name driver errors without a direct dependency.
pub use sqlx;
