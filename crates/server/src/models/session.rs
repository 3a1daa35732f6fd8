//! Session-related types for authentication.
//!
//! Types stored in the session to identify the logged-in user.

use serde::{Deserialize, Serialize};

use store_pulse_core::{Email, UserId, UserRole};

/// Session-stored identity claim.
///
/// Minimal data stored in the session to identify the caller: the (user id,
/// role) pair every authorization decision consumes, plus display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// User's role.
    pub role: UserRole,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
