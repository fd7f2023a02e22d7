//! Bearer-token identity for protected routes.
//!
//! Handlers that take an [`AuthenticatedUser`] argument only run once the
//! request carried a valid token; the verified identity is handed to the
//! handler as a plain value scoped to that request.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use tracing::{debug, error};
use uuid::Uuid;

use crate::auth::token::TokenService;
use crate::error::{AppError, AuthError};
use crate::AppState;

/// Identity of the caller, taken from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// A header that is absent, not a bearer scheme, or carries an empty token
/// counts as no credential at all.
pub fn extract_bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub fn authenticate(req: &HttpRequest, tokens: &TokenService) -> Result<AuthenticatedUser, AuthError> {
    let token = extract_bearer_token(req).ok_or(AuthError::MissingToken)?;

    let claims = tokens.verify(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        e
    })?;

    Ok(AuthenticatedUser {
        id: claims.user_id()?,
        email: claims.email,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<AppState>>() {
            Some(state) => authenticate(req, &state.tokens).map_err(AppError::from),
            None => {
                error!("AppState missing from application data");
                Err(AppError::InternalError("application state not configured".into()))
            }
        };

        ready(result)
    }
}
