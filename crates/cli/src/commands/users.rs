//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Bootstrap the first admin
//! sp-cli user create -n "Site Admin" -e admin@example.com -p <password> -r admin
//!
//! # Create a store owner
//! sp-cli user create -n "Alpha Owner" -e owner@example.com -p <password> -r store_owner
//! ```

use store_pulse_core::{Email, UserId, UserRole};
use store_pulse_server::db::{RepositoryError, UserRepository, create_pool};
use store_pulse_server::services::password;

use super::CommandError;

/// Create a new user with the given role.
///
/// # Errors
///
/// Returns `CommandError` for an invalid role or email, a duplicate email,
/// or a database failure.
///
/// # Returns
///
/// The ID of the created user.
pub async fn create_user(
    name: &str,
    email: &str,
    address: &str,
    plain_password: &str,
    role: &str,
) -> Result<UserId, CommandError> {
    // Parse and validate inputs before touching the database
    let role: UserRole = role
        .parse()
        .map_err(|_| CommandError::InvalidRole(role.to_owned()))?;
    let email = Email::parse(email).map_err(|_| CommandError::InvalidEmail(email.to_owned()))?;

    let password_hash =
        password::hash_password(plain_password).map_err(|e| CommandError::Password(e.to_string()))?;

    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Creating user: {} ({})", email, role);

    let user = UserRepository::new(&pool)
        .create(name, &email, address, role, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => CommandError::InvalidEmail(format!(
                "{email}: a user with this email already exists"
            )),
            other => other.into(),
        })?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}, Role: {}",
        user.id,
        user.email,
        user.role
    );

    Ok(user.id)
}
