//! Store domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use store_pulse_core::{StoreId, UserId};

use super::rating::RatingWithUser;
use super::user::UserSummary;

/// A store (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Store name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// User who owns this store.
    pub owner_id: UserId,
    /// When the store was registered.
    pub created_at: DateTime<Utc>,
}

/// A store with its derived rating aggregates, as served by listings.
///
/// `average_rating` is 0.0 when no ratings exist. The owner record is only
/// resolved for the admin audience.
#[derive(Debug, Clone, Serialize)]
pub struct StoreWithAggregate {
    pub id: StoreId,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    /// Arithmetic mean of all ratings, unrounded; 0.0 without ratings.
    pub average_rating: f64,
    /// Number of ratings submitted for this store.
    pub total_ratings: i64,
    /// Resolved owner, present in the admin listing only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserSummary>,
}

/// A store on the owner dashboard: aggregates plus every rating resolved
/// with its submitter.
#[derive(Debug, Clone, Serialize)]
pub struct OwnedStore {
    pub id: StoreId,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub average_rating: f64,
    pub ratings: Vec<RatingWithUser>,
}
