//! Seed the database with demo data for local development.
//!
//! Creates an admin, two store owners with stores, and a handful of normal
//! users who have rated them. Safe to re-run: existing users are reused,
//! existing stores are skipped, and ratings upsert.
//!
//! Every seeded account uses the password `storepulse-demo`.

use rand::Rng;
use sqlx::PgPool;

use store_pulse_core::{Email, RatingValue, StoreId, UserId, UserRole};
use store_pulse_server::db::{
    RatingRepository, RepositoryError, StoreRepository, UserRepository, create_pool,
};
use store_pulse_server::services::password;

use super::CommandError;

const DEMO_PASSWORD: &str = "storepulse-demo";

const OWNERS: &[(&str, &str)] = &[
    ("Alpha Owner", "alpha.owner@example.com"),
    ("Beacon Owner", "beacon.owner@example.com"),
];

const SHOPPERS: &[(&str, &str)] = &[
    ("Dana Shopper", "dana@example.com"),
    ("Eli Shopper", "eli@example.com"),
    ("Femi Shopper", "femi@example.com"),
    ("Gus Shopper", "gus@example.com"),
];

const STORES: &[(&str, &str, usize)] = &[
    ("Alpha Groceries", "1 Market Square", 0),
    ("Alpha Hardware", "2 Market Square", 0),
    ("Beacon Books", "17 Harbour Lane", 1),
    ("Beacon Coffee", "19 Harbour Lane", 1),
];

/// Seed the database.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a write fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    let password_hash =
        password::hash_password(DEMO_PASSWORD).map_err(|e| CommandError::Password(e.to_string()))?;

    ensure_user(
        &pool,
        "Site Admin",
        "admin@example.com",
        UserRole::Admin,
        &password_hash,
    )
    .await?;

    let mut owner_ids = Vec::with_capacity(OWNERS.len());
    for (name, email) in OWNERS {
        let id = ensure_user(&pool, name, email, UserRole::StoreOwner, &password_hash).await?;
        owner_ids.push(id);
    }

    let mut shopper_ids = Vec::with_capacity(SHOPPERS.len());
    for (name, email) in SHOPPERS {
        let id = ensure_user(&pool, name, email, UserRole::NormalUser, &password_hash).await?;
        shopper_ids.push(id);
    }

    let mut store_ids = Vec::with_capacity(STORES.len());
    for (name, address, owner_index) in STORES {
        let Some(owner_id) = owner_ids.get(*owner_index).copied() else {
            continue;
        };
        store_ids.push(ensure_store(&pool, name, address, owner_id).await?);
    }

    // Every shopper rates every store; values are random but stable across
    // re-runs only in count, not in value (ratings upsert). The values are
    // drawn up front so the RNG is not held across await points.
    let submissions: Vec<(UserId, StoreId, RatingValue)> = {
        let mut rng = rand::rng();
        shopper_ids
            .iter()
            .flat_map(|&shopper_id| store_ids.iter().map(move |&store_id| (shopper_id, store_id)))
            .map(|(shopper_id, store_id)| {
                let value = RatingValue::new(rng.random_range(RatingValue::MIN..=RatingValue::MAX))
                    .unwrap_or_else(|_| unreachable!("range is the valid rating range"));
                (shopper_id, store_id, value)
            })
            .collect()
    };

    let ratings = RatingRepository::new(&pool);
    for &(shopper_id, store_id, value) in &submissions {
        ratings.upsert(shopper_id, store_id, value).await?;
    }

    tracing::info!(
        users = 1 + owner_ids.len() + shopper_ids.len(),
        stores = store_ids.len(),
        ratings = submissions.len(),
        "Seeding complete!"
    );
    tracing::info!("All seeded accounts use the password '{DEMO_PASSWORD}'");

    Ok(())
}

/// Create a user, or return the existing one with the same email.
async fn ensure_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    role: UserRole,
    password_hash: &str,
) -> Result<UserId, CommandError> {
    let email = Email::parse(email).map_err(|_| CommandError::InvalidEmail(email.to_owned()))?;
    let users = UserRepository::new(pool);

    match users
        .create(name, &email, "", role, password_hash)
        .await
    {
        Ok(user) => {
            tracing::info!("Created {} ({})", user.email, user.role);
            Ok(user.id)
        }
        Err(RepositoryError::Conflict(_)) => {
            let existing = users
                .get_credentials_by_email(&email)
                .await?
                .ok_or(RepositoryError::NotFound)?;
            tracing::info!("Reusing existing {}", existing.user.email);
            Ok(existing.user.id)
        }
        Err(e) => Err(e.into()),
    }
}

/// Create a store unless one with the same name and owner already exists.
async fn ensure_store(
    pool: &PgPool,
    name: &str,
    address: &str,
    owner_id: UserId,
) -> Result<StoreId, CommandError> {
    let existing = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM store WHERE name = $1 AND owner_id = $2",
    )
    .bind(name)
    .bind(owner_id.as_i32())
    .fetch_optional(pool)
    .await?;

    if let Some(id) = existing {
        tracing::info!("Reusing existing store {name}");
        return Ok(StoreId::new(id));
    }

    let store = StoreRepository::new(pool)
        .create(name, address, owner_id)
        .await?;
    tracing::info!("Created store {}", store.name);
    Ok(store.id)
}
