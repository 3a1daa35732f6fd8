//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use store_pulse_core::{Email, UserId, UserRole};

/// A platform user (domain type).
///
/// The password credential stays in the database layer; this type is safe to
/// serialize in any response.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique across the platform).
    pub email: Email,
    /// Postal address.
    pub address: String,
    /// Role assigned at creation; immutable afterwards.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Minimal user identity attached to resolved ratings and store owners.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
