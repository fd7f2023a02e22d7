use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TodoRequest {
    fn fields(&self) -> (&str, &str) {
        (
            self.title.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
        )
    }
}

pub async fn list_todos(
    user: AuthenticatedUser,
    query: web::Query<ListQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let pagination = state
        .todo_service
        .pagination(query.page.as_deref(), query.limit.as_deref());
    let page = state.todo_service.list(user.id, pagination).await?;

    Ok(HttpResponse::Ok().json(page))
}

pub async fn create_todo(
    user: AuthenticatedUser,
    req: web::Json<TodoRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (title, description) = req.fields();
    let todo = state.todo_service.create(user.id, title, description).await?;

    Ok(HttpResponse::Created().json(todo))
}

pub async fn update_todo(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<TodoRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (title, description) = req.fields();
    let todo = state
        .todo_service
        .update(user.id, path.into_inner(), title, description)
        .await?;

    Ok(HttpResponse::Ok().json(todo))
}

pub async fn delete_todo(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    state.todo_service.delete(user.id, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
