//! Rating domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use store_pulse_core::{RatingId, RatingValue, StoreId, UserId};

use super::user::UserSummary;

/// A rating row (domain type).
///
/// At most one exists per (user, store) pair. Resubmission updates `rating`
/// in place and leaves `id` and `created_at` untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Rating {
    /// Unique rating ID.
    pub id: RatingId,
    /// User who submitted the rating.
    pub user_id: UserId,
    /// Store the rating is for.
    pub store_id: StoreId,
    /// The submitted value, 1-5.
    pub rating: RatingValue,
    /// When the rating was first submitted.
    pub created_at: DateTime<Utc>,
}

/// A rating resolved with its submitter, for the owner dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct RatingWithUser {
    pub id: RatingId,
    pub rating: RatingValue,
    pub created_at: DateTime<Utc>,
    /// The user who submitted this rating.
    pub user: UserSummary,
}
