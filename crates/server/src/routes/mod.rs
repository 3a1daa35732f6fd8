//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Auth
//! POST /auth/signup            - Self-register as a normal user
//! POST /auth/login             - Log in, establish a session
//! POST /auth/logout            - Log out
//! GET  /auth/me                - Current identity claim
//! PUT  /auth/password          - Replace own password
//!
//! # Stores
//! GET  /stores                 - Listing (admin gets the full surface)
//! POST /stores                 - Create store (admin)
//! GET  /stores/{id}            - Store detail with current average
//! PUT  /stores/{id}/rating     - Submit or update a rating (normal user)
//!
//! # Users (admin)
//! GET  /users                  - User listing with role filter
//! POST /users                  - Create user with any role
//! GET  /users/{id}             - User detail
//!
//! # Dashboards
//! GET  /dashboard              - Admin totals
//! GET  /my-stores              - Owner dashboard: stores + ratings + raters
//! ```

pub mod auth;
pub mod dashboard;
pub mod ratings;
pub mod stores;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::error::AppError;
use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/password", put(auth::change_password))
        // Stores
        .route("/stores", get(stores::index).post(stores::create))
        .route("/stores/{id}", get(stores::show))
        .route("/stores/{id}/rating", put(ratings::submit))
        // Users
        .route("/users", get(users::index).post(users::create))
        .route("/users/{id}", get(users::show))
        // Dashboards
        .route("/dashboard", get(dashboard::summary))
        .route("/my-stores", get(dashboard::my_stores))
}

// =============================================================================
// Shared request validation
// =============================================================================

const MAX_NAME_LENGTH: usize = 100;
const MAX_ADDRESS_LENGTH: usize = 400;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate a display name: non-blank, bounded length.
pub(crate) fn validate_name(name: &str) -> Result<(), AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a postal address: bounded length, may be empty.
pub(crate) fn validate_address(address: &str) -> Result<(), AppError> {
    if address.len() > MAX_ADDRESS_LENGTH {
        return Err(AppError::Validation(format!(
            "address must be at most {MAX_ADDRESS_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a new password: bounded length only; strength is the user's
/// business.
pub(crate) fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Alpha Groceries").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("").is_ok());
        assert!(validate_address("12 Main St").is_ok());
        assert!(validate_address(&"x".repeat(401)).is_err());
    }

    #[test]
    fn test_validate_password_bounds() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }
}
