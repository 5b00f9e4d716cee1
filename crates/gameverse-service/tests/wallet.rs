//! Wallet balance and top-up integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

// ============================================================================
// Balance
// ============================================================================

#[tokio::test]
async fn get_wallet_starts_at_zero() {
    let harness = TestHarness::new();
    harness.register_player().await;

    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance_cents"], 0);
    assert_eq!(body["balance_formatted"], "$0.00");
}

#[tokio::test]
async fn get_wallet_without_registration_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn get_wallet_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/wallet").await;

    response.assert_status_unauthorized();
}

// ============================================================================
// Credit
// ============================================================================

#[tokio::test]
async fn credit_wallet_returns_new_balance() {
    let harness = TestHarness::new();
    harness.register_player().await;

    let response = harness
        .server
        .post("/v1/wallet/credit")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "amount": 50.0 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["new_balance_cents"], 5000);
    assert_eq!(body["balance_formatted"], "$50.00");

    // Credits accumulate.
    let response = harness
        .server
        .post("/v1/wallet/credit")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "amount": 0.01 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["new_balance_cents"], 5001);
}

#[tokio::test]
async fn credit_wallet_rejects_zero_amount() {
    let harness = TestHarness::new();
    harness.register_player().await;

    let response = harness
        .server
        .post("/v1/wallet/credit")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "amount": 0.0 }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn credit_wallet_rejects_negative_amount() {
    let harness = TestHarness::new();
    harness.register_player().await;

    let response = harness
        .server
        .post("/v1/wallet/credit")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "amount": -20.0 }))
        .await;

    response.assert_status_bad_request();

    // Balance untouched.
    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance_cents"], 0);
}

#[tokio::test]
async fn credit_wallet_rejects_non_numeric_amount() {
    let harness = TestHarness::new();
    harness.register_player().await;

    let response = harness
        .server
        .post("/v1/wallet/credit")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "amount": "fifty" }))
        .await;

    // Axum rejects undeserializable JSON bodies before the handler runs.
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn credit_wallet_unknown_player_fails() {
    let harness = TestHarness::new();
    // No registration.

    let response = harness
        .server
        .post("/v1/wallet/credit")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "amount": 10.0 }))
        .await;

    response.assert_status_not_found();
}
