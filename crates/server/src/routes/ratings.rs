//! Rating submission handler.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use store_pulse_core::{RatingValue, StoreId};

use crate::db::{RatingRepository, RepositoryError};
use crate::error::AppError;
use crate::middleware::auth::RequireNormalUser;
use crate::models::Rating;
use crate::state::AppState;

/// Rating submission request body.
///
/// The value is taken as a raw JSON number so both out-of-range and
/// non-integer inputs map to this API's validation error rather than a
/// generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    pub rating: serde_json::Number,
}

impl SubmitRatingRequest {
    fn value(&self) -> Result<RatingValue, AppError> {
        let raw = self
            .rating
            .as_i64()
            .ok_or_else(|| AppError::Validation("rating must be an integer".to_string()))?;
        let raw = i16::try_from(raw).map_err(|_| {
            AppError::Validation(format!(
                "rating must be between {} and {}",
                RatingValue::MIN,
                RatingValue::MAX
            ))
        })?;
        Ok(RatingValue::new(raw)?)
    }
}

/// Submit a rating for a store, or update the caller's existing one.
///
/// Idempotent per (caller, store): the first call creates the rating, every
/// later call overwrites its value in place. Resubmission is an update, not
/// a conflict.
#[instrument(skip(user, state, body))]
pub async fn submit(
    RequireNormalUser(user): RequireNormalUser,
    State(state): State<AppState>,
    Path(store_id): Path<i32>,
    Json(body): Json<SubmitRatingRequest>,
) -> Result<Json<Rating>, AppError> {
    let value = body.value()?;
    let store_id = StoreId::new(store_id);

    let rating = RatingRepository::new(state.pool())
        .upsert(user.id, store_id, value)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("store {store_id} not found")),
            other => other.into(),
        })?;

    tracing::info!(
        user_id = %user.id,
        store_id = %store_id,
        rating = %value,
        "rating submitted"
    );

    Ok(Json(rating))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(body: &str) -> SubmitRatingRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_accepts_in_range_integers() {
        assert_eq!(request(r#"{"rating": 3}"#).value().unwrap().get(), 3);
        assert_eq!(request(r#"{"rating": 1}"#).value().unwrap().get(), 1);
        assert_eq!(request(r#"{"rating": 5}"#).value().unwrap().get(), 5);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            request(r#"{"rating": 0}"#).value(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            request(r#"{"rating": 6}"#).value(),
            Err(AppError::Validation(_))
        ));
        // Far outside i16
        assert!(matches!(
            request(r#"{"rating": 99999999999}"#).value(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_non_integer() {
        let err = request(r#"{"rating": 4.5}"#).value().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("integer"));
    }
}
