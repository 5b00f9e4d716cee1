//! Purchase flow integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

// ============================================================================
// Successful purchase
// ============================================================================

#[tokio::test]
async fn purchase_debits_wallet_and_fills_library() {
    let harness = TestHarness::new();
    harness.register_player().await;
    harness.register_admin().await;
    let game_id = harness.create_game("Nebula Drift", 19.99).await;
    harness.credit_wallet(50.0).await;

    let response = harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "game_id": game_id, "price": 19.99 }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Purchase successful!");
    assert_eq!(body["new_balance_cents"], 3001);
    assert_eq!(body["balance_formatted"], "$30.01");
    assert!(body["license_id"].as_str().is_some());

    // The wallet reflects the debit.
    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance_cents"], 3001);

    // The library contains the game.
    let response = harness
        .server
        .get("/v1/library")
        .add_header("authorization", harness.user_auth_header())
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let library = body.as_array().unwrap();
    assert_eq!(library.len(), 1);
    assert_eq!(library[0]["title"], "Nebula Drift");
}

#[tokio::test]
async fn first_purchase_grants_achievement_once() {
    let harness = TestHarness::new();
    harness.register_player().await;
    harness.register_admin().await;
    let game_id = harness.create_game("Nebula Drift", 10.0).await;
    harness.credit_wallet(50.0).await;

    // No achievements before the purchase.
    let response = harness
        .server
        .get("/v1/achievements/me")
        .add_header("authorization", harness.user_auth_header())
        .await;
    assert!(response.json::<serde_json::Value>().as_array().unwrap().is_empty());

    // First purchase unlocks "First Purchase".
    harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "game_id": game_id, "price": 10.0 }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = harness
        .server
        .get("/v1/achievements/me")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    let unlocked = body.as_array().unwrap();
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0]["name"], "First Purchase");

    // A second purchase grants nothing further.
    harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "game_id": game_id, "price": 10.0 }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = harness
        .server
        .get("/v1/achievements/me")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Both licenses are in the library.
    let response = harness
        .server
        .get("/v1/library")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn purchase_with_insufficient_funds_changes_nothing() {
    let harness = TestHarness::new();
    harness.register_player().await;
    harness.register_admin().await;
    let game_id = harness.create_game("Nebula Drift", 19.99).await;
    harness.credit_wallet(10.0).await;

    let response = harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "game_id": game_id, "price": 19.99 }))
        .await;

    response.assert_status(axum::http::StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "insufficient_funds");
    assert_eq!(body["error"]["details"]["balance"], 1000);
    assert_eq!(body["error"]["details"]["required"], 1999);

    // Balance and library are untouched.
    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance_cents"], 1000);

    let response = harness
        .server
        .get("/v1/library")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert!(body.as_array().unwrap().is_empty());

    // No achievement was granted either.
    let response = harness
        .server
        .get("/v1/achievements/me")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn purchase_with_negative_price_is_rejected() {
    let harness = TestHarness::new();
    harness.register_player().await;
    harness.register_admin().await;
    let game_id = harness.create_game("Nebula Drift", 19.99).await;

    let response = harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "game_id": game_id, "price": -1.0 }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn purchase_with_malformed_game_id_is_rejected() {
    let harness = TestHarness::new();
    harness.register_player().await;

    let response = harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "game_id": "not-a-uuid", "price": 1.0 }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn purchase_of_unknown_game_fails() {
    let harness = TestHarness::new();
    harness.register_player().await;
    harness.credit_wallet(50.0).await;

    let response = harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "game_id": uuid::Uuid::new_v4().to_string(),
            "price": 1.0
        }))
        .await;

    response.assert_status_not_found();

    // The failed transaction rolled back; nothing was debited.
    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance_cents"], 5000);
}

#[tokio::test]
async fn purchase_by_unregistered_player_fails() {
    let harness = TestHarness::new();
    harness.register_admin().await;
    let game_id = harness.create_game("Nebula Drift", 19.99).await;

    let response = harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "game_id": game_id, "price": 19.99 }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn purchase_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/purchases")
        .json(&json!({ "game_id": "x", "price": 1.0 }))
        .await;

    response.assert_status_unauthorized();
}

// ============================================================================
// Catalog admin gate
// ============================================================================

#[tokio::test]
async fn create_game_requires_admin_role() {
    let harness = TestHarness::new();
    harness.register_player().await;

    let response = harness
        .server
        .post("/v1/games")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Nebula Drift",
            "genre": "Racing",
            "rating": 4.5,
            "price": 19.99
        }))
        .await;

    response.assert_status_forbidden();
}
