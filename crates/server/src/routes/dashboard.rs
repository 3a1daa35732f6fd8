//! Dashboard handlers: admin totals and the owner's store view.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::{RatingRepository, StoreRepository, UserRepository};
use crate::error::AppError;
use crate::middleware::auth::{RequireAdmin, RequireStoreOwner};
use crate::models::OwnedStore;
use crate::state::AppState;

/// Admin dashboard totals.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_users: i64,
    pub total_stores: i64,
    pub total_ratings: i64,
}

/// Platform totals (admin only).
#[instrument(skip(state))]
pub async fn summary(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let pool = state.pool();

    let total_users = UserRepository::new(pool).count_all().await?;
    let total_stores = StoreRepository::new(pool).count_all().await?;
    let total_ratings = RatingRepository::new(pool).count_all().await?;

    Ok(Json(DashboardSummary {
        total_users,
        total_stores,
        total_ratings,
    }))
}

/// Owner dashboard: the caller's stores, each with its average rating and
/// every rating resolved with the submitting user.
#[instrument(skip(user, state))]
pub async fn my_stores(
    RequireStoreOwner(user): RequireStoreOwner,
    State(state): State<AppState>,
) -> Result<Json<Vec<OwnedStore>>, AppError> {
    let stores = StoreRepository::new(state.pool())
        .list_owned(user.id)
        .await?;

    Ok(Json(stores))
}
