use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenService;
use crate::db::models::{NewUser, UserSummary};
use crate::db::Store;
use crate::error::{AppError, AuthError, DatabaseError};
use crate::Result;

/// Token plus the user it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

pub struct AuthService {
    store: Arc<dyn Store>,
    tokens: Arc<TokenService>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        if is_blank(name) || is_blank(email) || password.is_empty() {
            return Err(AppError::validation("Name, email and password are mandatory"));
        }

        if self.store.find_user_by_email(email).await?.is_some() {
            debug!("Registration rejected, email already in use");
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = Self::hash_off_thread(password.to_string()).await?;
        let new_user = NewUser::new(name.to_string(), email.to_string(), password_hash);

        // A concurrent registration may win between the lookup and the insert;
        // the unique constraint on email is what settles it.
        let user = match self.store.create_user(&new_user).await {
            Ok(user) => user,
            Err(AppError::DatabaseError(DatabaseError::Duplicate(_))) => {
                warn!("Concurrent registration for the same email lost the race");
                return Err(AppError::conflict("Email already registered"));
            }
            Err(e) => return Err(e),
        };

        let token = self.tokens.issue(user.id, &user.email)?;
        info!("Registered user {}", user.id);

        Ok(AuthResponse {
            token,
            user: user.summary(),
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        if is_blank(email) || password.is_empty() {
            return Err(AppError::validation("Email and password are mandatory"));
        }

        // Unknown email and wrong password are reported identically.
        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_hash = user.password_hash.clone();
        if !Self::verify_off_thread(password.to_string(), password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        info!("User {} logged in", user.id);

        Ok(AuthResponse {
            token,
            user: user.summary(),
        })
    }

    async fn hash_off_thread(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
    }

    async fn verify_off_thread(password: String, password_hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }
}
