//! Authentication route handlers: signup, login, logout, password change.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use store_pulse_core::{Email, UserRole};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::auth::{RequireUser, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::password;
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub password: String,
}

/// Self-registration. Always creates a `normal_user`; other roles are
/// created by admins via `POST /users`.
#[instrument(skip(state, body))]
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
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
            UserRole::NormalUser,
            &password_hash,
        )
        .await?;

    tracing::info!(user_id = %user.id, "user signed up");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Verify credentials and establish a session.
///
/// A missing user and a wrong password produce the same response, so the
/// endpoint cannot be used to probe which emails exist.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<CurrentUser>, AppError> {
    let invalid = || AppError::Unauthorized("invalid email or password".to_string());

    let email = Email::parse(&body.email).map_err(|_| invalid())?;

    let credentials = UserRepository::new(state.pool())
        .get_credentials_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    let verified = password::verify_password(&body.password, &credentials.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !verified {
        return Err(invalid());
    }

    let user = credentials.user;
    let current = CurrentUser {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
    };
    set_current_user(&session, &current).await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(current))
}

/// Clear the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    clear_current_user(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Echo the caller's identity claim.
#[instrument(skip(user))]
pub async fn me(RequireUser(user): RequireUser) -> Json<CurrentUser> {
    Json(user)
}

/// Password change request body.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Replace the caller's password in place.
#[instrument(skip(user, state, body))]
pub async fn change_password(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    super::validate_password(&body.new_password)?;

    let users = UserRepository::new(state.pool());
    let stored_hash = users
        .password_hash_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    let verified = password::verify_password(&body.current_password, &stored_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !verified {
        return Err(AppError::Unauthorized(
            "current password is incorrect".to_string(),
        ));
    }

    let new_hash = password::hash_password(&body.new_password)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    users.update_password(user.id, &new_hash).await?;

    tracing::info!(user_id = %user.id, "password changed");

    Ok(StatusCode::NO_CONTENT)
}
