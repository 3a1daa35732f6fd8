//! Database operations for the StorePulse `PostgreSQL` schema.
//!
//! ## Tables
//!
//! - `app_user` - Platform users (admin, normal_user, store_owner)
//! - `store` - Stores registered by admins
//! - `rating` - One row per (user, store) pair, `UNIQUE (user_id, store_id)`
//! - `session` - Session storage for tower-sessions
//!
//! The uniqueness of a rating is owned by the database constraint; the
//! repositories upsert against it instead of check-then-act.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p store-pulse-cli -- migrate
//! ```

pub mod ratings;
pub mod stores;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use ratings::RatingRepository;
pub use stores::{StoreAudience, StoreListParams, StoreRepository};
pub use users::{UserCredentials, UserListParams, UserRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Turn a raw search string into a case-insensitive substring pattern.
///
/// LIKE metacharacters in the input are escaped so a search for "50%" does
/// not act as a wildcard.
#[must_use]
pub fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_input() {
        assert_eq!(like_pattern("alpha"), "%alpha%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }
}
