//! Core entity definitions for the todo server.
//!
//! This crate defines the todo record shared by the storage backends and the
//! HTTP layer, along with the payloads used to create and patch it.

mod todo;

pub use todo::*;
