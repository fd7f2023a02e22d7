use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::models::{NewTodo, NewUser, Todo, TodoChanges, User};
use crate::db::store::Store;
use crate::error::{AppError, DatabaseError};
use crate::Result;

pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub async fn new_with_options(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .map_err(|e| AppError::DatabaseError(DatabaseError::ConnectionError(e.to_string())))?;

        Ok(Self { pool: Arc::new(pool) })
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await?;
        info!("Database migrations applied");
        Ok(())
    }

    pub async fn begin_transaction(&self) -> Result<Transaction<'_, Postgres>> {
        Ok(self.pool.as_ref().begin().await?)
    }

    async fn create_user_with_transaction(
        &self,
        user: &NewUser,
        transaction: &mut Transaction<'_, Postgres>,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&mut **transaction)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl Store for DbOperations {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut transaction = self.begin_transaction().await?;

        let result = self.create_user_with_transaction(user, &mut transaction).await;

        match result {
            Ok(user) => {
                transaction.commit().await?;
                debug!("Inserted user {}", user.id);
                Ok(user)
            }
            Err(e) => {
                transaction.rollback().await?;
                Err(e)
            }
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn list_todos(&self, owner: Uuid, limit: i64, offset: i64) -> Result<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, is_completed, created_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(todos)
    }

    async fn count_todos(&self, owner: Uuid) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE user_id = $1")
            .bind(owner)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(total)
    }

    async fn create_todo(&self, owner: Uuid, todo: &NewTodo) -> Result<Todo> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (id, title, description, is_completed, created_at, user_id)
            VALUES ($1, $2, $3, FALSE, NOW(), $4)
            RETURNING id, title, description, is_completed, created_at
            "#,
        )
        .bind(todo.id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(owner)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(todo)
    }

    async fn update_todo(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: &TodoChanges,
    ) -> Result<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = $1, description = $2
            WHERE id = $3 AND user_id = $4
            RETURNING id, title, description, is_completed, created_at
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(todo)
    }

    async fn delete_todo(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
