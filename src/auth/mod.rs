//! Authentication module for the todo server
//!
//! Password hashing, token issuance and verification, the
//! registration/login flow and the bearer-token extractor used by
//! protected routes.

pub mod handlers;
pub mod middleware;
pub mod password;
mod service;
mod token;

pub use middleware::AuthenticatedUser;
pub use service::{AuthResponse, AuthService};
pub use token::{Claims, TokenService};
