//! Integration tests for admin user management and the auth flows.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded admin account (sp-cli seed)
//! - The server running (cargo run -p store-pulse-server)
//!
//! Run with: cargo test -p store-pulse-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};

use store_pulse_integration_tests::{
    admin_client, base_url, client, signup_and_login, unique_email, unique_name,
};

// ============================================================================
// User listing
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_role_filter_with_case_insensitive_query() {
    let admin = admin_client().await;
    let base = base_url();

    // One store_owner and one normal_user sharing a distinctive email stem
    let stem = format!("casefold{}", uuid::Uuid::new_v4().simple());
    let owner_email = format!("{stem}-owner@example.com");
    let resp = admin
        .post(format!("{base}/users"))
        .json(&json!({
            "name": unique_name("Case Owner"),
            "email": owner_email,
            "password": "integration-pass",
            "role": "store_owner",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = admin
        .post(format!("{base}/users"))
        .json(&json!({
            "name": unique_name("Case Shopper"),
            "email": format!("{stem}-shopper@example.com"),
            "password": "integration-pass",
            "role": "normal_user",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    // Query in the "wrong" case, narrowed to store owners: only the owner
    // matches, and the filter is case-insensitive
    let resp = admin
        .get(format!("{base}/users"))
        .query(&[("query", stem.to_uppercase().as_str()), ("role", "store_owner")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let page: Value = resp.json().await.unwrap();
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["email"], owner_email.as_str());
    assert_eq!(items[0]["role"], "store_owner");
}

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_user_listing_never_exposes_password_fields() {
    let admin = admin_client().await;

    let resp = admin
        .get(format!("{}/users", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let page: Value = resp.json().await.unwrap();

    for user in page["items"].as_array().unwrap() {
        assert!(user.get("password").is_none());
        assert!(user.get("password_hash").is_none());
    }
}

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_user_listing_is_admin_only() {
    let base = base_url();

    // Anonymous: unauthorized
    let resp = client().get(format!("{base}/users")).send().await.unwrap();
    assert_eq!(resp.status(), 401);

    // Normal user: forbidden
    let shopper = client();
    signup_and_login(
        &shopper,
        &unique_name("Shopper"),
        &unique_email("shopper"),
        "integration-pass",
    )
    .await;
    let resp = shopper.get(format!("{base}/users")).send().await.unwrap();
    assert_eq!(resp.status(), 403);
    let err: Value = resp.json().await.unwrap();
    assert_eq!(err["error"]["kind"], "forbidden");
}

// ============================================================================
// Signup & password management
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_duplicate_signup_is_a_conflict() {
    let base = base_url();
    let email = unique_email("dup");

    let first = client();
    signup_and_login(&first, &unique_name("First"), &email, "integration-pass").await;

    let resp = client()
        .post(format!("{base}/auth/signup"))
        .json(&json!({
            "name": unique_name("Second"),
            "email": email,
            "password": "integration-pass",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let err: Value = resp.json().await.unwrap();
    assert_eq!(err["error"]["kind"], "conflict");
}

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_password_change_flow() {
    let base = base_url();
    let email = unique_email("rotate");

    let shopper = client();
    signup_and_login(&shopper, &unique_name("Rotate"), &email, "old-password-1").await;

    // Wrong current password is rejected
    let resp = shopper
        .put(format!("{base}/auth/password"))
        .json(&json!({"current_password": "guess", "new_password": "new-password-1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Correct current password replaces the credential in place
    let resp = shopper
        .put(format!("{base}/auth/password"))
        .json(&json!({"current_password": "old-password-1", "new_password": "new-password-1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    // Old credential no longer works; the new one does
    let resp = client()
        .post(format!("{base}/auth/login"))
        .json(&json!({"email": email, "password": "old-password-1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let fresh = client();
    let resp = fresh
        .post(format!("{base}/auth/login"))
        .json(&json!({"email": email, "password": "new-password-1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

// ============================================================================
// Admin dashboard
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_dashboard_totals_grow_with_signups() {
    let admin = admin_client().await;
    let base = base_url();

    let before: Value = admin
        .get(format!("{base}/dashboard"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let shopper = client();
    signup_and_login(
        &shopper,
        &unique_name("Counted"),
        &unique_email("counted"),
        "integration-pass",
    )
    .await;

    let after: Value = admin
        .get(format!("{base}/dashboard"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        after["total_users"].as_i64().unwrap(),
        before["total_users"].as_i64().unwrap() + 1
    );
    assert!(after["total_stores"].as_i64().unwrap() >= before["total_stores"].as_i64().unwrap());
}
