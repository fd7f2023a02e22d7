use async_trait::async_trait;
use uuid::Uuid;

use crate::db::models::{NewTodo, NewUser, Todo, TodoChanges, User};
use crate::Result;

/// Persistence boundary for users and their todos.
///
/// Every todo operation takes the owner's id and must only ever touch rows
/// belonging to that owner. Implementations report a duplicate email through
/// `DatabaseError::Duplicate` so registration races surface as conflicts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Owner's todos, newest first.
    async fn list_todos(&self, owner: Uuid, limit: i64, offset: i64) -> Result<Vec<Todo>>;

    async fn count_todos(&self, owner: Uuid) -> Result<i64>;

    async fn create_todo(&self, owner: Uuid, todo: &NewTodo) -> Result<Todo>;

    /// `None` when no todo with `id` belongs to `owner`.
    async fn update_todo(&self, owner: Uuid, id: Uuid, changes: &TodoChanges)
        -> Result<Option<Todo>>;

    /// `false` when no todo with `id` belongs to `owner`.
    async fn delete_todo(&self, owner: Uuid, id: Uuid) -> Result<bool>;

    async fn ping(&self) -> Result<()>;

    async fn close(&self);
}
