//! Database module for the todo server
//!
//! This module holds the row models, the `Store` persistence boundary
//! and its Postgres implementation.

pub mod models;
pub mod operations;
pub mod store;

pub use models::{NewTodo, NewUser, Todo, TodoChanges, User, UserSummary};
pub use operations::DbOperations;
pub use store::Store;

#[cfg(test)]
pub use store::MockStore;
