//! Integration tests for store listings, aggregates, and the owner
//! dashboard.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded admin account (sp-cli seed)
//! - The server running (cargo run -p store-pulse-server)
//!
//! Run with: cargo test -p store-pulse-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use serde_json::Value;

use store_pulse_integration_tests::{
    admin_client, base_url, client, create_store_with_owner, find_store, login, signup_and_login,
    submit_rating, unique_email, unique_name,
};

// ============================================================================
// Aggregates
// ============================================================================

/// The full average-rating scenario: 0 with no ratings, 4.0 after one
/// rating of 4, 4.5 after a second rating of 5, 3.5 after the first user
/// edits theirs to 2 - with exactly two rating rows at the end.
#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_average_rating_scenario() {
    let admin = admin_client().await;
    let (store_id, store_name, _) = create_store_with_owner(&admin, "Alpha").await;

    // No ratings: average is exactly 0, not null
    let store = find_store(&admin, &store_name).await;
    assert!((store["average_rating"].as_f64().unwrap() - 0.0).abs() < f64::EPSILON);
    assert_eq!(store["total_ratings"], 0);

    let u1 = client();
    signup_and_login(&u1, &unique_name("U1"), &unique_email("u1"), "integration-pass").await;
    let u2 = client();
    signup_and_login(&u2, &unique_name("U2"), &unique_email("u2"), "integration-pass").await;

    // U1 rates 4 -> 4.0
    assert_eq!(submit_rating(&u1, store_id, 4).await.status(), 200);
    let store = find_store(&admin, &store_name).await;
    assert!((store["average_rating"].as_f64().unwrap() - 4.0).abs() < f64::EPSILON);

    // U2 rates 5 -> 4.5
    assert_eq!(submit_rating(&u2, store_id, 5).await.status(), 200);
    let store = find_store(&admin, &store_name).await;
    assert!((store["average_rating"].as_f64().unwrap() - 4.5).abs() < f64::EPSILON);

    // U1 edits to 2 -> 3.5, still exactly 2 rows
    assert_eq!(submit_rating(&u1, store_id, 2).await.status(), 200);
    let store = find_store(&admin, &store_name).await;
    assert!((store["average_rating"].as_f64().unwrap() - 3.5).abs() < f64::EPSILON);
    assert_eq!(store["total_ratings"], 2);
}

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_store_detail_carries_current_average() {
    let admin = admin_client().await;
    let (store_id, _, _) = create_store_with_owner(&admin, "Detail").await;
    let base = base_url();

    let detail: Value = admin
        .get(format!("{base}/stores/{store_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!((detail["average_rating"].as_f64().unwrap() - 0.0).abs() < f64::EPSILON);

    let shopper = client();
    signup_and_login(
        &shopper,
        &unique_name("Shopper"),
        &unique_email("shopper"),
        "integration-pass",
    )
    .await;
    assert_eq!(submit_rating(&shopper, store_id, 3).await.status(), 200);

    let detail: Value = admin
        .get(format!("{base}/stores/{store_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!((detail["average_rating"].as_f64().unwrap() - 3.0).abs() < f64::EPSILON);

    // Unknown store
    let resp = admin
        .get(format!("{base}/stores/999999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

// ============================================================================
// Listing: filter, sort, pagination, audiences
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_listing_sorts_by_derived_average() {
    let admin = admin_client().await;
    // Shared prefix so one query isolates both stores
    let prefix = unique_name("SortPair");
    let (low_id, low_name, _) = create_store_with_owner(&admin, &format!("{prefix} Low")).await;
    let (high_id, _, _) = create_store_with_owner(&admin, &format!("{prefix} High")).await;

    let shopper = client();
    signup_and_login(
        &shopper,
        &unique_name("Shopper"),
        &unique_email("shopper"),
        "integration-pass",
    )
    .await;
    assert_eq!(submit_rating(&shopper, low_id, 1).await.status(), 200);
    assert_eq!(submit_rating(&shopper, high_id, 5).await.status(), 200);

    let resp = admin
        .get(format!("{}/stores", base_url()))
        .query(&[("query", prefix.as_str()), ("sort", "rating"), ("order", "desc")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let page: Value = resp.json().await.unwrap();
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"].as_i64().unwrap(), high_id);
    assert_eq!(items[1]["name"], low_name);
}

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_public_listing_hides_owner() {
    let admin = admin_client().await;
    let (_, store_name, owner_email) = create_store_with_owner(&admin, "Audience").await;

    // Admin sees the resolved owner record
    let store = find_store(&admin, &store_name).await;
    assert_eq!(store["owner"]["email"], owner_email.as_str());

    // A normal user sees the public subset: no owner field at all
    let shopper = client();
    signup_and_login(
        &shopper,
        &unique_name("Shopper"),
        &unique_email("shopper"),
        "integration-pass",
    )
    .await;
    let resp = shopper
        .get(format!("{}/stores", base_url()))
        .query(&[("query", store_name.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let page: Value = resp.json().await.unwrap();
    let item = page["items"].as_array().unwrap().first().unwrap().clone();
    assert!(item.get("owner").is_none());

    // Owner email must not act as a filter for the public audience
    let resp = shopper
        .get(format!("{}/stores", base_url()))
        .query(&[("query", owner_email.as_str())])
        .send()
        .await
        .unwrap();
    let page: Value = resp.json().await.unwrap();
    assert_eq!(page["total"], 0);
}

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_listing_pagination_shape() {
    let admin = admin_client().await;

    let resp = admin
        .get(format!("{}/stores", base_url()))
        .query(&[("page", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let page: store_pulse_core::Page<Value> = resp.json().await.unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);
    assert!(page.total >= page.items.len() as i64);
}

// ============================================================================
// Owner dashboard
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded PostgreSQL"]
async fn test_owner_dashboard_resolves_raters() {
    let admin = admin_client().await;
    let (store_id, store_name, owner_email) = create_store_with_owner(&admin, "Dashboard").await;

    let shopper = client();
    let shopper_email = unique_email("rater");
    signup_and_login(&shopper, &unique_name("Rater"), &shopper_email, "integration-pass").await;
    assert_eq!(submit_rating(&shopper, store_id, 5).await.status(), 200);

    let owner = client();
    login(&owner, &owner_email, "integration-pass").await;
    let resp = owner
        .get(format!("{}/my-stores", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let stores: Value = resp.json().await.unwrap();
    let store = stores
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == store_name.as_str())
        .expect("owned store should appear on the dashboard");
    assert!((store["average_rating"].as_f64().unwrap() - 5.0).abs() < f64::EPSILON);

    let ratings = store["ratings"].as_array().unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0]["rating"], 5);
    assert_eq!(ratings[0]["user"]["email"], shopper_email.as_str());

    // The dashboard is owner-only
    let resp = shopper
        .get(format!("{}/my-stores", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}
