//! Rating repository: the ledger owning rating rows and their aggregates.
//!
//! The one-rating-per-(user, store) invariant is enforced by the
//! `rating_user_store_key` constraint. Submission is a single atomic
//! insert-or-update against that constraint, so two concurrent submissions
//! for the same pair can never produce two rows and never surface a
//! uniqueness violation to the caller.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use store_pulse_core::{Email, RatingId, RatingValue, StoreId, UserId};

use super::RepositoryError;
use crate::models::{Rating, RatingWithUser, UserSummary};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for rating queries.
#[derive(Debug, sqlx::FromRow)]
struct RatingRow {
    id: i32,
    user_id: i32,
    store_id: i32,
    rating: i16,
    created_at: DateTime<Utc>,
}

impl TryFrom<RatingRow> for Rating {
    type Error = RepositoryError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        let rating = RatingValue::new(row.rating).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid rating in database: {e}"))
        })?;

        Ok(Self {
            id: RatingId::new(row.id),
            user_id: UserId::new(row.user_id),
            store_id: StoreId::new(row.store_id),
            rating,
            created_at: row.created_at,
        })
    }
}

/// Internal row type for ratings joined with their submitter.
#[derive(Debug, sqlx::FromRow)]
struct RatingWithUserRow {
    id: i32,
    rating: i16,
    created_at: DateTime<Utc>,
    user_id: i32,
    user_name: String,
    user_email: String,
}

impl TryFrom<RatingWithUserRow> for RatingWithUser {
    type Error = RepositoryError;

    fn try_from(row: RatingWithUserRow) -> Result<Self, Self::Error> {
        let rating = RatingValue::new(row.rating).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid rating in database: {e}"))
        })?;
        let email = Email::parse(&row.user_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: RatingId::new(row.id),
            rating,
            created_at: row.created_at,
            user: UserSummary {
                id: UserId::new(row.user_id),
                name: row.user_name,
                email,
            },
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for rating database operations.
pub struct RatingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RatingRepository<'a> {
    /// Create a new rating repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Submit a rating, creating or updating the row for (user, store).
    ///
    /// On first submission a fresh row is created. On resubmission the same
    /// row's value is updated in place; `id` and `created_at` are preserved.
    /// Concurrent submissions for the same pair are serialized by the
    /// uniqueness constraint (last write wins).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store or user does not
    /// exist. Returns `RepositoryError::Database` for other database errors.
    pub async fn upsert(
        &self,
        user_id: UserId,
        store_id: StoreId,
        value: RatingValue,
    ) -> Result<Rating, RepositoryError> {
        let row = sqlx::query_as::<_, RatingRow>(
            r"
            INSERT INTO rating (user_id, store_id, rating)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT rating_user_store_key
            DO UPDATE SET rating = EXCLUDED.rating
            RETURNING id, user_id, store_id, rating, created_at
            ",
        )
        .bind(user_id.as_i32())
        .bind(store_id.as_i32())
        .bind(value.get())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Average rating for a store: 0.0 when no ratings exist, otherwise the
    /// unrounded arithmetic mean.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn average_for_store(&self, store_id: StoreId) -> Result<f64, RepositoryError> {
        let average = sqlx::query_scalar::<_, f64>(
            r"
            SELECT COALESCE(AVG(rating), 0)::float8
            FROM rating
            WHERE store_id = $1
            ",
        )
        .bind(store_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(average)
    }

    /// All ratings for a store, each resolved with its submitter.
    ///
    /// Order is stable (submission time, then id); callers may re-sort.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_for_store(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<RatingWithUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, RatingWithUserRow>(
            r"
            SELECT r.id, r.rating, r.created_at,
                   u.id AS user_id, u.name AS user_name, u.email AS user_email
            FROM rating r
            JOIN app_user u ON u.id = r.user_id
            WHERE r.store_id = $1
            ORDER BY r.created_at ASC, r.id ASC
            ",
        )
        .bind(store_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Average rating across every store a user owns: 0.0 when none of
    /// their stores have ratings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn average_for_owner(&self, owner_id: UserId) -> Result<f64, RepositoryError> {
        let average = sqlx::query_scalar::<_, f64>(
            r"
            SELECT COALESCE(AVG(r.rating), 0)::float8
            FROM rating r
            JOIN store s ON s.id = r.store_id
            WHERE s.owner_id = $1
            ",
        )
        .bind(owner_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(average)
    }

    /// Total number of ratings across all stores.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rating")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
