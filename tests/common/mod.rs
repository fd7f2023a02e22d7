#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use todo_server::db::{NewTodo, NewUser, Store, Todo, TodoChanges, User};
use todo_server::error::DatabaseError;
use todo_server::{AppError, AppState, Settings};

struct StoredTodo {
    owner: Uuid,
    seq: u64,
    todo: Todo,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    todos: Vec<StoredTodo>,
    next_seq: u64,
}

/// In-memory `Store` with the same ownership and uniqueness rules as Postgres.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Duplicate("Duplicate record".into()).into());
        }

        let created = User {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_todos(&self, owner: Uuid, limit: i64, offset: i64) -> Result<Vec<Todo>, AppError> {
        let tables = self.tables.read().await;
        let mut owned: Vec<&StoredTodo> = tables.todos.iter().filter(|t| t.owner == owner).collect();
        // Insertion order is creation order, newest first.
        owned.sort_by(|a, b| b.seq.cmp(&a.seq));

        Ok(owned
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|t| t.todo.clone())
            .collect())
    }

    async fn count_todos(&self, owner: Uuid) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.todos.iter().filter(|t| t.owner == owner).count() as i64)
    }

    async fn create_todo(&self, owner: Uuid, todo: &NewTodo) -> Result<Todo, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == owner) {
            return Err(DatabaseError::QueryError("foreign key violation".into()).into());
        }

        let created = Todo {
            id: todo.id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            is_completed: false,
            created_at: Utc::now(),
        };
        let seq = tables.next_seq;
        tables.next_seq += 1;
        tables.todos.push(StoredTodo {
            owner,
            seq,
            todo: created.clone(),
        });
        Ok(created)
    }

    async fn update_todo(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: &TodoChanges,
    ) -> Result<Option<Todo>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .todos
            .iter_mut()
            .find(|t| t.owner == owner && t.todo.id == id)
            .map(|t| {
                t.todo.title = changes.title.clone();
                t.todo.description = changes.description.clone();
                t.todo.clone()
            }))
    }

    async fn delete_todo(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.todos.len();
        tables.todos.retain(|t| !(t.owner == owner && t.todo.id == id));
        Ok(tables.todos.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn close(&self) {}
}

/// Store whose every query fails, standing in for a lost database.
pub struct BrokenStore;

fn broken() -> AppError {
    DatabaseError::QueryError("relation \"todos\" does not exist at SELECT * FROM todos".into()).into()
}

#[async_trait]
impl Store for BrokenStore {
    async fn create_user(&self, _user: &NewUser) -> Result<User, AppError> {
        Err(broken())
    }

    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
        Err(broken())
    }

    async fn list_todos(&self, _owner: Uuid, _limit: i64, _offset: i64) -> Result<Vec<Todo>, AppError> {
        Err(broken())
    }

    async fn count_todos(&self, _owner: Uuid) -> Result<i64, AppError> {
        Err(broken())
    }

    async fn create_todo(&self, _owner: Uuid, _todo: &NewTodo) -> Result<Todo, AppError> {
        Err(broken())
    }

    async fn update_todo(
        &self,
        _owner: Uuid,
        _id: Uuid,
        _changes: &TodoChanges,
    ) -> Result<Option<Todo>, AppError> {
        Err(broken())
    }

    async fn delete_todo(&self, _owner: Uuid, _id: Uuid) -> Result<bool, AppError> {
        Err(broken())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(broken())
    }

    async fn close(&self) {}
}

pub fn memory_state() -> AppState {
    AppState::with_store(
        Settings::for_test().expect("Failed to load test config"),
        Arc::new(MemoryStore::new()),
    )
}

pub fn broken_state() -> AppState {
    AppState::with_store(
        Settings::for_test().expect("Failed to load test config"),
        Arc::new(BrokenStore),
    )
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// A token for `user_id` that expired an hour ago.
pub fn expired_token(state: &AppState, user_id: Uuid, email: &str) -> String {
    state
        .tokens
        .issue_at(user_id, email, Utc::now() - Duration::hours(25))
        .expect("Failed to issue token")
}

/// Send a request and return its status with the JSON body (`Null` when empty).
pub async fn call<S, R, B, E>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = E>,
    B: MessageBody,
    E: Debug,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("Response body is not JSON")
    };
    (status, json)
}

/// Register a user and return the issued token.
pub async fn register<S, B, E>(app: &S, name: &str, email: &str, password: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = E>,
    B: MessageBody,
    E: Debug,
{
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request();
    let (status, body) = call(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
    body["token"].as_str().expect("token missing").to_string()
}

/// Create a todo and return its id.
pub async fn create_todo<S, B, E>(app: &S, token: &str, title: &str, description: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = E>,
    B: MessageBody,
    E: Debug,
{
    let req = test::TestRequest::post()
        .uri("/todos")
        .insert_header(bearer(token))
        .set_json(json!({ "title": title, "description": description }))
        .to_request();
    let (status, body) = call(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body["id"].as_str().expect("id missing").to_string()
}
