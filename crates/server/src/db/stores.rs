//! Store repository: creation, aggregate listings, and the owner dashboard.
//!
//! Average rating and total ratings are derived at query time from the
//! rating rows; nothing aggregate is ever stored.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use store_pulse_core::{Email, Page, PageRequest, SortOrder, StoreId, StoreSortField, UserId};

use super::RepositoryError;
use crate::models::{OwnedStore, Store, StoreWithAggregate, UserSummary};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for store queries.
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: i32,
    name: String,
    address: String,
    owner_id: i32,
    created_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: StoreId::new(row.id),
            name: row.name,
            address: row.address,
            owner_id: UserId::new(row.owner_id),
            created_at: row.created_at,
        }
    }
}

/// Internal row type for the aggregate listing.
///
/// Owner columns are NULL for the public audience, which never joins them.
#[derive(Debug, sqlx::FromRow)]
struct StoreListRow {
    id: i32,
    name: String,
    address: String,
    created_at: DateTime<Utc>,
    average_rating: f64,
    total_ratings: i64,
    owner_id: Option<i32>,
    owner_name: Option<String>,
    owner_email: Option<String>,
}

impl TryFrom<StoreListRow> for StoreWithAggregate {
    type Error = RepositoryError;

    fn try_from(row: StoreListRow) -> Result<Self, Self::Error> {
        let owner = match (row.owner_id, row.owner_name, row.owner_email) {
            (Some(id), Some(name), Some(email)) => {
                let email = Email::parse(&email).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
                })?;
                Some(UserSummary {
                    id: UserId::new(id),
                    name,
                    email,
                })
            }
            _ => None,
        };

        Ok(Self {
            id: StoreId::new(row.id),
            name: row.name,
            address: row.address,
            created_at: row.created_at,
            average_rating: row.average_rating,
            total_ratings: row.total_ratings,
            owner,
        })
    }
}

/// Internal row type for the owner dashboard.
#[derive(Debug, sqlx::FromRow)]
struct OwnedStoreRow {
    id: i32,
    name: String,
    address: String,
    created_at: DateTime<Utc>,
    average_rating: f64,
}

// =============================================================================
// Listing parameters
// =============================================================================

/// Which listing surface is asking.
///
/// Admins get the full surface: the filter also matches the owner's email,
/// and each store resolves its owner record. Everyone else gets the public
/// subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAudience {
    Admin,
    Public,
}

/// Listing parameters for [`StoreRepository::list`].
#[derive(Debug, Clone, Default)]
pub struct StoreListParams {
    /// Case-insensitive substring match over name and address (and owner
    /// email for the admin audience).
    pub query: Option<String>,
    pub sort: StoreSortField,
    pub order: SortOrder,
    pub page: PageRequest,
}

/// Whitelisted ORDER BY expression for a store sort field.
///
/// `Rating` sorts by the derived average, referenced through its SELECT
/// alias.
const fn sort_expr(field: StoreSortField) -> &'static str {
    match field {
        StoreSortField::Name => "s.name",
        StoreSortField::Address => "s.address",
        StoreSortField::Rating => "average_rating",
        StoreSortField::CreatedAt => "s.created_at",
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the owner user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        address: &str,
        owner_id: UserId,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO store (name, address, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, address, owner_id, created_at
            ",
        )
        .bind(name)
        .bind(address)
        .bind(owner_id.as_i32())
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

        Ok(row.into())
    }

    /// Get a store by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, address, owner_id, created_at
            FROM store
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List stores with derived aggregates, filtered, sorted, and paginated.
    ///
    /// Sorting by rating compares the derived average, not a stored column.
    /// Equal sort keys fall back to id order so pages are stable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list(
        &self,
        params: &StoreListParams,
        audience: StoreAudience,
        page_size: u32,
    ) -> Result<Page<StoreWithAggregate>, RepositoryError> {
        let pattern = params.query.as_deref().map(super::like_pattern);

        // The owner join exists only for the admin audience: it widens the
        // filter to the owner's email and resolves the owner record.
        let (owner_select, owner_join, filter, group_by) = match audience {
            StoreAudience::Admin => (
                "o.id AS owner_id, o.name AS owner_name, o.email AS owner_email",
                "JOIN app_user o ON o.id = s.owner_id",
                "($1::text IS NULL OR s.name ILIKE $1 OR s.address ILIKE $1 OR o.email ILIKE $1)",
                "s.id, o.id",
            ),
            StoreAudience::Public => (
                "NULL::integer AS owner_id, NULL::text AS owner_name, NULL::text AS owner_email",
                "",
                "($1::text IS NULL OR s.name ILIKE $1 OR s.address ILIKE $1)",
                "s.id",
            ),
        };

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM store s {owner_join} WHERE {filter}"
        ))
        .bind(pattern.as_deref())
        .fetch_one(self.pool)
        .await?;

        let sql = format!(
            "SELECT s.id, s.name, s.address, s.created_at,
                    COALESCE(AVG(r.rating), 0)::float8 AS average_rating,
                    COUNT(r.id) AS total_ratings,
                    {owner_select}
             FROM store s
             {owner_join}
             LEFT JOIN rating r ON r.store_id = s.id
             WHERE {filter}
             GROUP BY {group_by}
             ORDER BY {expr} {dir}, s.id ASC
             LIMIT $2 OFFSET $3",
            expr = sort_expr(params.sort),
            dir = params.order.as_sql(),
        );
        let rows = sqlx::query_as::<_, StoreListRow>(&sql)
            .bind(pattern.as_deref())
            .bind(i64::from(page_size))
            .bind(params.page.offset(page_size))
            .fetch_all(self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total, params.page, page_size))
    }

    /// Stores owned by a user, each with its derived average and every
    /// rating resolved with its submitter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_owned(&self, owner_id: UserId) -> Result<Vec<OwnedStore>, RepositoryError> {
        let rows = sqlx::query_as::<_, OwnedStoreRow>(
            r"
            SELECT s.id, s.name, s.address, s.created_at,
                   COALESCE(AVG(r.rating), 0)::float8 AS average_rating
            FROM store s
            LEFT JOIN rating r ON r.store_id = s.id
            WHERE s.owner_id = $1
            GROUP BY s.id
            ORDER BY s.created_at ASC, s.id ASC
            ",
        )
        .bind(owner_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let ratings = super::RatingRepository::new(self.pool);
        let mut stores = Vec::with_capacity(rows.len());
        for row in rows {
            let store_ratings = ratings.list_for_store(StoreId::new(row.id)).await?;
            stores.push(OwnedStore {
                id: StoreId::new(row.id),
                name: row.name,
                address: row.address,
                created_at: row.created_at,
                average_rating: row.average_rating,
                ratings: store_ratings,
            });
        }

        Ok(stores)
    }

    /// Total number of stores.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM store")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_expr_rating_uses_derived_average() {
        assert_eq!(sort_expr(StoreSortField::Rating), "average_rating");
    }

    #[test]
    fn test_sort_expr_covers_every_field() {
        assert_eq!(sort_expr(StoreSortField::Name), "s.name");
        assert_eq!(sort_expr(StoreSortField::Address), "s.address");
        assert_eq!(sort_expr(StoreSortField::CreatedAt), "s.created_at");
    }
}
