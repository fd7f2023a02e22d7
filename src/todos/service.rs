use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::models::{NewTodo, Todo, TodoChanges};
use crate::db::Store;
use crate::error::AppError;
use crate::Result;

/// Page/limit pair after defaults and clamping have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Values that are missing, non-numeric or below 1 fall back to the defaults.
    pub fn resolve(page: Option<&str>, limit: Option<&str>, default_limit: i64, max_limit: i64) -> Self {
        fn positive(raw: Option<&str>) -> Option<i64> {
            raw.and_then(|v| v.trim().parse::<i64>().ok()).filter(|v| *v >= 1)
        }

        Self {
            page: positive(page).unwrap_or(1),
            limit: positive(limit).unwrap_or(default_limit).min(max_limit),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoPage {
    pub data: Vec<Todo>,
    pub page: i64,
    pub limit: i64,
    /// Number of todos the caller owns across all pages.
    pub total: i64,
}

/// Identifying fields returned by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

impl From<Todo> for TodoView {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
        }
    }
}

/// Todo operations, always scoped to the authenticated owner.
pub struct TodoService {
    store: Arc<dyn Store>,
    default_limit: i64,
    max_limit: i64,
}

fn require_content(title: &str, description: &str) -> Result<()> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(AppError::validation("Title and description are mandatory"));
    }
    Ok(())
}

impl TodoService {
    pub fn new(store: Arc<dyn Store>, default_limit: i64, max_limit: i64) -> Self {
        Self {
            store,
            default_limit,
            max_limit,
        }
    }

    pub fn pagination(&self, page: Option<&str>, limit: Option<&str>) -> Pagination {
        Pagination::resolve(page, limit, self.default_limit, self.max_limit)
    }

    pub async fn list(&self, owner: Uuid, pagination: Pagination) -> Result<TodoPage> {
        let data = self
            .store
            .list_todos(owner, pagination.limit, pagination.offset())
            .await?;
        let total = self.store.count_todos(owner).await?;

        debug!("Listed {} of {} todos for user {}", data.len(), total, owner);

        Ok(TodoPage {
            data,
            page: pagination.page,
            limit: pagination.limit,
            total,
        })
    }

    pub async fn create(&self, owner: Uuid, title: &str, description: &str) -> Result<TodoView> {
        require_content(title, description)?;

        let todo = self
            .store
            .create_todo(owner, &NewTodo::new(title.to_string(), description.to_string()))
            .await?;
        info!("User {} created todo {}", owner, todo.id);

        Ok(todo.into())
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<TodoView> {
        require_content(title, description)?;

        let changes = TodoChanges {
            title: title.to_string(),
            description: description.to_string(),
        };

        // Someone else's todo and a missing todo look the same to the caller.
        let todo = self
            .store
            .update_todo(owner, id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Todo not found"))?;
        info!("User {} updated todo {}", owner, id);

        Ok(todo.into())
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<()> {
        if !self.store.delete_todo(owner, id).await? {
            return Err(AppError::not_found("Todo not found"));
        }
        info!("User {} deleted todo {}", owner, id);
        Ok(())
    }
}
