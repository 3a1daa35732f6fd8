//! Authentication extractors.
//!
//! The operation-to-role table of the API lives here as types: each handler
//! names the capability it needs by taking one of these extractors, so the
//! check runs once at the boundary instead of inside handler bodies.
//!
//! | Extractor            | Accepts                       |
//! |----------------------|-------------------------------|
//! | `RequireUser`        | any authenticated caller      |
//! | `RequireAdmin`       | role `admin`                  |
//! | `RequireNormalUser`  | role `normal_user`            |
//! | `RequireStoreOwner`  | role `store_owner`            |

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use store_pulse_core::UserRole;

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};

/// Read the identity claim from the session, or reject with Unauthorized.
async fn current_user(parts: &mut Parts) -> Result<CurrentUser, AppError> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or_else(|| AppError::Unauthorized("no session".to_string()))?;

    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| AppError::Unauthorized("not logged in".to_string()))
}

/// Extractor that requires any authenticated caller.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user(parts).await?))
    }
}

/// Extractor that requires the `admin` role.
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await?;
        if user.role != UserRole::Admin {
            return Err(AppError::Forbidden(
                "only administrators can access this resource".to_string(),
            ));
        }
        Ok(Self(user))
    }
}

/// Extractor that requires the `normal_user` role (rating submission).
pub struct RequireNormalUser(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireNormalUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await?;
        if user.role != UserRole::NormalUser {
            return Err(AppError::Forbidden(
                "only normal users can submit ratings".to_string(),
            ));
        }
        Ok(Self(user))
    }
}

/// Extractor that requires the `store_owner` role (owner dashboard).
pub struct RequireStoreOwner(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireStoreOwner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await?;
        if user.role != UserRole::StoreOwner {
            return Err(AppError::Forbidden(
                "only store owners can access this resource".to_string(),
            ));
        }
        Ok(Self(user))
    }
}

/// Helper to set the current user in the session (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
