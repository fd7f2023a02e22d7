pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod todos;

use std::sync::Arc;
use actix_web::{web, HttpResponse};
use tracing::{info, warn};

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use crate::config::Settings;

pub use auth::{AuthService, AuthenticatedUser, TokenService};
pub use db::{DbOperations, Store};
pub use todos::TodoService;

/// Health check endpoint handler
/// Reports server status, timestamp and whether the database answers.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match state.store.ping().await {
        Ok(()) => "up",
        Err(e) => {
            warn!("Health check database probe failed: {}", e);
            "down"
        }
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": database,
    }))
}

/// Register every route and the extractor error handlers.
///
/// Shared by the binary and the integration tests so both serve the same app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::validation(format!("Invalid JSON body: {}", err)).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::validation(format!("Invalid query string: {}", err)).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|_err, _req| AppError::not_found("Todo not found").into()),
    )
    .route("/health", web::get().to(health_check))
    .route("/register", web::post().to(auth::handlers::register))
    .route("/login", web::post().to(auth::handlers::login))
    .service(
        web::scope("/todos")
            .route("", web::get().to(todos::handlers::list_todos))
            .route("", web::post().to(todos::handlers::create_todo))
            .route("/{id}", web::put().to(todos::handlers::update_todo))
            .route("/{id}", web::delete().to(todos::handlers::delete_todo)),
    );
}

/// Application state shared across all components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub todo_service: Arc<TodoService>,
}

impl AppState {
    /// Connect to Postgres, apply migrations and wire up the services.
    pub async fn new(config: Settings) -> Result<Self> {
        let db = DbOperations::new_with_options(
            &config.database.url,
            config.database.max_connections,
            config.database.acquire_timeout(),
        )
        .await?;
        db.migrate().await?;
        info!(
            "Database pool ready (max {} connections)",
            config.database.max_connections
        );

        Ok(Self::with_store(config, Arc::new(db)))
    }

    /// Wire up the services around an already constructed store.
    pub fn with_store(config: Settings, store: Arc<dyn Store>) -> Self {
        let tokens = Arc::new(TokenService::new(
            &config.auth.jwt_secret,
            config.auth.token_expiry_hours,
        ));
        let auth_service = Arc::new(AuthService::new(store.clone(), tokens.clone()));
        let todo_service = Arc::new(TodoService::new(
            store.clone(),
            config.todos.default_limit,
            config.todos.max_limit,
        ));

        Self {
            config: Arc::new(config),
            store,
            tokens,
            auth_service,
            todo_service,
        }
    }

    pub async fn shutdown(&self) -> Result<()> {
        // Close database connections
        self.store.close().await;
        Ok(())
    }
}
