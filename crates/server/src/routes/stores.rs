//! Store listing and creation handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use store_pulse_core::{Page, PageRequest, SortOrder, StoreId, StoreSortField, UserId, UserRole};

use crate::db::{
    RatingRepository, RepositoryError, StoreAudience, StoreListParams, StoreRepository,
};
use crate::error::AppError;
use crate::middleware::auth::{RequireAdmin, RequireUser};
use crate::models::{Store, StoreWithAggregate};
use crate::state::AppState;

/// Query parameters for the store listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListStoresQuery {
    /// Case-insensitive substring filter.
    pub query: Option<String>,
    pub sort: StoreSortField,
    pub order: SortOrder,
    pub page: PageRequest,
}

/// Store listing with derived aggregates.
///
/// Admin callers get the full surface (owner email in the filter, resolved
/// owner records); everyone else gets the public subset.
#[instrument(skip(user, state))]
pub async fn index(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Query(query): Query<ListStoresQuery>,
) -> Result<Json<Page<StoreWithAggregate>>, AppError> {
    let audience = if user.role == UserRole::Admin {
        StoreAudience::Admin
    } else {
        StoreAudience::Public
    };

    let params = StoreListParams {
        query: query.query,
        sort: query.sort,
        order: query.order,
        page: query.page,
    };

    let page = StoreRepository::new(state.pool())
        .list(&params, audience, state.page_size())
        .await?;

    Ok(Json(page))
}

/// Store detail: the store plus its derived average.
#[derive(Debug, Serialize)]
pub struct StoreDetail {
    #[serde(flatten)]
    pub store: Store,
    /// Arithmetic mean of all ratings, unrounded; 0.0 without ratings.
    pub average_rating: f64,
}

/// Store detail with its current average rating.
#[instrument(skip(state))]
pub async fn show(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Path(store_id): Path<i32>,
) -> Result<Json<StoreDetail>, AppError> {
    let store_id = StoreId::new(store_id);

    let store = StoreRepository::new(state.pool())
        .get_by_id(store_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("store {store_id} not found")))?;

    let average_rating = RatingRepository::new(state.pool())
        .average_for_store(store_id)
        .await?;

    Ok(Json(StoreDetail {
        store,
        average_rating,
    }))
}

/// Store creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub owner_id: UserId,
}

/// Create a store (admin only).
///
/// The owner must exist; it conventionally has the `store_owner` role but
/// that is not enforced here.
#[instrument(skip(state, body))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateStoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    super::validate_name(&body.name)?;
    super::validate_address(&body.address)?;

    let store = StoreRepository::new(state.pool())
        .create(body.name.trim(), &body.address, body.owner_id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound(format!("owner user {} not found", body.owner_id))
            }
            other => other.into(),
        })?;

    tracing::info!(store_id = %store.id, "store created");

    Ok((StatusCode::CREATED, Json(store)))
}
