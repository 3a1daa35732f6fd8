//! Admin user management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use store_pulse_core::{
    Email, Page, PageRequest, RoleFilter, SortOrder, UserId, UserRole, UserSortField,
};

use crate::db::{RatingRepository, UserListParams, UserRepository};
use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::models::User;
use crate::services::password;
use crate::state::AppState;

/// Query parameters for the user listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListUsersQuery {
    /// Case-insensitive substring filter.
    pub query: Option<String>,
    pub role: RoleFilter,
    pub sort: UserSortField,
    pub order: SortOrder,
    pub page: PageRequest,
}

/// User listing (admin only). Password hashes never appear in responses.
#[instrument(skip(state))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Page<User>>, AppError> {
    let params = UserListParams {
        query: query.query,
        role: query.role,
        sort: query.sort,
        order: query.order,
        page: query.page,
    };

    let page = UserRepository::new(state.pool())
        .list(&params, state.page_size())
        .await?;

    Ok(Json(page))
}

/// User creation request body (admin only; any role).
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub password: String,
    pub role: UserRole,
}

/// Create a user with an explicit role (admin only).
#[instrument(skip(state, body))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    super::validate_name(&body.name)?;
    super::validate_address(&body.address)?;
    super::validate_password(&body.password)?;
    let email = Email::parse(&body.email)?;

    let password_hash = password::hash_password(&body.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = UserRepository::new(state.pool())
        .create(
            body.name.trim(),
            &email,
            &body.address,
            body.role,
            &password_hash,
        )
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// User detail: the user record, plus the average rating across their
/// stores when they are a store owner.
#[derive(Debug, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    /// Average rating across owned stores; only present for store owners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

/// User detail (admin only).
#[instrument(skip(state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserDetail>, AppError> {
    let user_id = UserId::new(user_id);

    let user = UserRepository::new(state.pool())
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id} not found")))?;

    let average_rating = if user.role == UserRole::StoreOwner {
        Some(
            RatingRepository::new(state.pool())
                .average_for_owner(user_id)
                .await?,
        )
    } else {
        None
    };

    Ok(Json(UserDetail {
        user,
        average_rating,
    }))
}
