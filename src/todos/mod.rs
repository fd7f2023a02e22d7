//! Todo module for the todo server
//!
//! List/create/update/delete of the authenticated user's own todos.

pub mod handlers;
mod service;

pub use service::{Pagination, TodoPage, TodoService, TodoView};
