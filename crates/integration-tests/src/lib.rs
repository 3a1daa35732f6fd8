//! Integration tests for StorePulse.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, migrate, and seed
//! cargo run -p store-pulse-cli -- migrate
//! cargo run -p store-pulse-cli -- seed
//!
//! # Start the server
//! cargo run -p store-pulse-server
//!
//! # Run integration tests
//! cargo test -p store-pulse-integration-tests -- --ignored
//! ```
//!
//! The tests talk to a live server over HTTP with cookie-store clients, one
//! client per identity. Each test creates its own uniquely-named users and
//! stores so runs don't interfere.
//!
//! # Environment Variables
//!
//! - `STOREPULSE_BASE_URL` - Server base URL (default: `http://localhost:3000`)
//! - `STOREPULSE_TEST_ADMIN_EMAIL` / `STOREPULSE_TEST_ADMIN_PASSWORD` -
//!   Admin credentials (defaults match `sp-cli seed`)

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREPULSE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with its own cookie store (its own session).
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email so test runs never collide.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4().simple())
}

/// A unique display name with a searchable prefix.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4().simple())
}

/// Sign up a normal user and log the client in. Returns the user JSON.
pub async fn signup_and_login(client: &Client, name: &str, email: &str, password: &str) -> Value {
    let base = base_url();

    let resp = client
        .post(format!("{base}/auth/signup"))
        .json(&json!({"name": name, "email": email, "password": password}))
        .send()
        .await
        .expect("signup request failed");
    assert_eq!(resp.status(), 201, "signup should succeed");
    let user: Value = resp.json().await.expect("signup response should be JSON");

    login(client, email, password).await;
    user
}

/// Log a client in.
pub async fn login(client: &Client, email: &str, password: &str) {
    let base = base_url();
    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 200, "login should succeed");
}

/// A client logged in with the seeded admin credentials.
pub async fn admin_client() -> Client {
    let email = std::env::var("STOREPULSE_TEST_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@example.com".to_string());
    let password = std::env::var("STOREPULSE_TEST_ADMIN_PASSWORD")
        .unwrap_or_else(|_| "storepulse-demo".to_string());

    let client = client();
    login(&client, &email, &password).await;
    client
}

/// Create a store owner (via the admin) plus their store.
/// Returns (store id, store name, owner email).
pub async fn create_store_with_owner(admin: &Client, prefix: &str) -> (i64, String, String) {
    let base = base_url();

    let owner_email = unique_email(&format!("{prefix}-owner"));
    let resp = admin
        .post(format!("{base}/users"))
        .json(&json!({
            "name": unique_name(prefix),
            "email": owner_email,
            "password": "integration-pass",
            "role": "store_owner",
        }))
        .send()
        .await
        .expect("owner creation failed");
    assert_eq!(resp.status(), 201, "owner creation should succeed");
    let owner: Value = resp.json().await.unwrap();

    let store_name = unique_name(prefix);
    let resp = admin
        .post(format!("{base}/stores"))
        .json(&json!({
            "name": store_name,
            "address": "1 Integration Way",
            "owner_id": owner["id"],
        }))
        .send()
        .await
        .expect("store creation failed");
    assert_eq!(resp.status(), 201, "store creation should succeed");
    let store: Value = resp.json().await.unwrap();

    (store["id"].as_i64().unwrap(), store_name, owner_email)
}

/// Fetch a single store (with aggregates) from the admin listing by its
/// unique name.
pub async fn find_store(admin: &Client, store_name: &str) -> Value {
    let base = base_url();
    let resp = admin
        .get(format!("{base}/stores"))
        .query(&[("query", store_name)])
        .send()
        .await
        .expect("store listing failed");
    assert_eq!(resp.status(), 200);

    let page: Value = resp.json().await.unwrap();
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 1, "store name should be unique: {store_name}");
    items.first().unwrap().clone()
}

/// Submit a rating for a store as the given client.
pub async fn submit_rating(client: &Client, store_id: i64, rating: i64) -> reqwest::Response {
    let base = base_url();
    client
        .put(format!("{base}/stores/{store_id}/rating"))
        .json(&json!({"rating": rating}))
        .send()
        .await
        .expect("rating request failed")
}
