use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = req.email.as_deref().unwrap_or_default();
    info!("Received login request for email: {}", email);

    match state
        .auth_service
        .login(email, req.password.as_deref().unwrap_or_default())
        .await
    {
        Ok(response) => {
            info!("Login successful for email: {}", email);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            warn!("Login failed for email: {}: {}", email, e);
            Err(e)
        }
    }
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = req.email.as_deref().unwrap_or_default();
    info!("Received registration request for email: {}", email);

    match state
        .auth_service
        .register(
            req.name.as_deref().unwrap_or_default(),
            email,
            req.password.as_deref().unwrap_or_default(),
        )
        .await
    {
        Ok(response) => {
            info!("Registration successful for email: {}", email);
            Ok(HttpResponse::Created().json(response))
        }
        Err(e) => {
            warn!("Registration failed for email: {}: {}", email, e);
            Err(e)
        }
    }
}
