//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use store_pulse_core::{
    Email, Page, PageRequest, RoleFilter, SortOrder, UserId, UserRole, UserSortField,
};

use super::RepositoryError;
use crate::models::User;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    address: String,
    role: UserRole,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            name: row.name,
            email,
            address: row.address,
            role: row.role,
            created_at: row.created_at,
        })
    }
}

/// Internal row type for credential lookups.
#[derive(Debug, sqlx::FromRow)]
struct CredentialsRow {
    id: i32,
    name: String,
    email: String,
    address: String,
    role: UserRole,
    created_at: DateTime<Utc>,
    password_hash: String,
}

/// A user together with their stored password hash, for credential checks.
///
/// Never leaves the auth flow; the hash is opaque to everything else.
#[derive(Debug)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Listing parameters for [`UserRepository::list`].
#[derive(Debug, Clone, Default)]
pub struct UserListParams {
    /// Case-insensitive substring match over name, email, and address.
    pub query: Option<String>,
    pub role: RoleFilter,
    pub sort: UserSortField,
    pub order: SortOrder,
    pub page: PageRequest,
}

/// Whitelisted ORDER BY column for a user sort field.
const fn sort_expr(field: UserSortField) -> &'static str {
    match field {
        UserSortField::Name => "name",
        UserSortField::Email => "email",
        UserSortField::Role => "role",
        UserSortField::CreatedAt => "created_at",
    }
}

/// Shared WHERE clause for the listing and its count.
const LIST_FILTER: &str = "($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1 OR address ILIKE $1) \
     AND ($2::text IS NULL OR role::text = $2)";

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        address: &str,
        role: UserRole,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO app_user (name, email, address, role, password_hash)
            VALUES ($1, $2, $3, $4::user_role, $5)
            RETURNING id, name, email, address, role, created_at
            ",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(address)
        .bind(role.to_string())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email, address, role, created_at
            FROM app_user
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user with their password hash by email, for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r"
            SELECT id, name, email, address, role, created_at, password_hash
            FROM app_user
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let password_hash = row.password_hash.clone();
        let user = UserRow {
            id: row.id,
            name: row.name,
            email: row.email,
            address: row.address,
            role: row.role,
            created_at: row.created_at,
        }
        .try_into()?;

        Ok(Some(UserCredentials {
            user,
            password_hash,
        }))
    }

    /// Get the stored password hash for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn password_hash_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<String>, RepositoryError> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM app_user WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(hash)
    }

    /// Replace a user's password hash in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE app_user SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List users with filtering, sorting, and pagination.
    ///
    /// The filter is a case-insensitive substring match over name, email,
    /// and address; the role filter narrows to a single role. Equal sort
    /// keys fall back to id order so pages are stable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list(
        &self,
        params: &UserListParams,
        page_size: u32,
    ) -> Result<Page<User>, RepositoryError> {
        let pattern = params.query.as_deref().map(super::like_pattern);
        let role = params.role.as_role().map(|r| r.to_string());

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM app_user WHERE {LIST_FILTER}"
        ))
        .bind(pattern.as_deref())
        .bind(role.as_deref())
        .fetch_one(self.pool)
        .await?;

        let sql = format!(
            "SELECT id, name, email, address, role, created_at
             FROM app_user
             WHERE {LIST_FILTER}
             ORDER BY {expr} {dir}, id ASC
             LIMIT $3 OFFSET $4",
            expr = sort_expr(params.sort),
            dir = params.order.as_sql(),
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(pattern.as_deref())
            .bind(role.as_deref())
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

    /// Total number of users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM app_user")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_expr_covers_every_field() {
        assert_eq!(sort_expr(UserSortField::Name), "name");
        assert_eq!(sort_expr(UserSortField::Email), "email");
        assert_eq!(sort_expr(UserSortField::Role), "role");
        assert_eq!(sort_expr(UserSortField::CreatedAt), "created_at");
    }
}
