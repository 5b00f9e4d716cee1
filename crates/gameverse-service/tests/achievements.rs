//! Achievement, review, and leaderboard integration tests.

mod common;

use common::TestHarness;
use gameverse_core::PlayerId;
use serde_json::json;

// ============================================================================
// Definitions
// ============================================================================

#[tokio::test]
async fn achievement_catalog_is_public() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/achievements").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let definitions = body.as_array().unwrap();
    assert_eq!(definitions.len(), 4);

    let names: Vec<_> = definitions
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"First Purchase"));
    assert!(names.contains(&"Community Voice"));
}

// ============================================================================
// First review trigger
// ============================================================================

#[tokio::test]
async fn first_review_grants_achievement_once() {
    let harness = TestHarness::new();
    harness.register_player().await;
    harness.register_admin().await;
    let game_id = harness.create_game("Nebula Drift", 19.99).await;

    // First review unlocks "Community Voice".
    harness
        .server
        .post(&format!("/v1/games/{game_id}/reviews"))
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "experience": "20 hours in",
            "feedback": "Tight handling, great soundtrack.",
            "recommendation": "Recommended for racing fans."
        }))
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
    assert_eq!(unlocked[0]["name"], "Community Voice");
    assert!(unlocked[0]["unlocked_at"].as_str().is_some());

    // A second review grants nothing further.
    harness
        .server
        .post(&format!("/v1/games/{game_id}/reviews"))
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "experience": "40 hours in",
            "feedback": "Still holds up.",
            "recommendation": "Recommended."
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = harness
        .server
        .get("/v1/achievements/me")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn review_of_unknown_game_fails() {
    let harness = TestHarness::new();
    harness.register_player().await;

    let response = harness
        .server
        .post(&format!("/v1/games/{}/reviews", uuid::Uuid::new_v4()))
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "experience": "none",
            "feedback": "none",
            "recommendation": "none"
        }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn reviews_appear_on_game_detail() {
    let harness = TestHarness::new();
    harness.register_player().await;
    harness.register_admin().await;
    let game_id = harness.create_game("Nebula Drift", 19.99).await;

    harness
        .server
        .post(&format!("/v1/games/{game_id}/reviews"))
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "experience": "20 hours in",
            "feedback": "Tight handling.",
            "recommendation": "Recommended."
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = harness.server.get(&format!("/v1/games/{game_id}")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["game"]["title"], "Nebula Drift");
    let reviews = body["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["author_first_name"], "Ada");
}

// ============================================================================
// Leaderboard
// ============================================================================

#[tokio::test]
async fn leaderboard_orders_by_unlocks_and_includes_zero() {
    let harness = TestHarness::new();
    harness.register_admin().await;
    let game_id = harness.create_game("Nebula Drift", 1.0).await;

    // Three players: one with two unlocks, one with one, one with none.
    let quiet = PlayerId::generate();
    let silent = PlayerId::generate();

    harness.register_player().await;
    for (id, first, last) in [
        (quiet, "Quentin", "Quiet"),
        (silent, "Sana", "Silent"),
    ] {
        harness
            .server
            .post("/v1/players")
            .add_header("authorization", TestHarness::auth_header_for(id))
            .json(&json!({
                "first_name": first,
                "last_name": last,
                "email": format!("{}@example.com", first.to_lowercase())
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    // busy: first purchase + first review = two achievements.
    harness.credit_wallet(10.0).await;
    harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "game_id": game_id, "price": 1.0 }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    harness
        .server
        .post(&format!("/v1/games/{game_id}/reviews"))
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "experience": "an hour",
            "feedback": "Fun.",
            "recommendation": "Yes."
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    // quiet: one review achievement.
    harness
        .server
        .post(&format!("/v1/games/{game_id}/reviews"))
        .add_header("authorization", TestHarness::auth_header_for(quiet))
        .json(&json!({
            "experience": "a while",
            "feedback": "Decent.",
            "recommendation": "Maybe."
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = harness.server.get("/v1/leaderboard").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let rows = body.as_array().unwrap();

    // Admin and the three players are all ranked, zero-unlock rows included.
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["first_name"], "Ada");
    assert_eq!(rows[0]["achievements_unlocked"], 2);
    assert_eq!(rows[1]["first_name"], "Quentin");
    assert_eq!(rows[1]["achievements_unlocked"], 1);
    // Tie at zero breaks by first name.
    assert_eq!(rows[2]["first_name"], "Grace");
    assert_eq!(rows[2]["achievements_unlocked"], 0);
    assert_eq!(rows[3]["first_name"], "Sana");
    assert_eq!(rows[3]["achievements_unlocked"], 0);
}

// ============================================================================
// Admin stats
// ============================================================================

#[tokio::test]
async fn admin_stats_counts_licenses() {
    let harness = TestHarness::new();
    harness.register_player().await;
    harness.register_admin().await;
    let game_id = harness.create_game("Nebula Drift", 1.0).await;
    harness.credit_wallet(10.0).await;

    harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "game_id": game_id, "price": 1.0 }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = harness
        .server
        .get("/v1/admin/stats")
        .add_header("authorization", harness.admin_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_players"], 2);
    assert_eq!(body["total_games"], 1);
    assert_eq!(body["total_licenses_sold"], 1);
}

#[tokio::test]
async fn admin_stats_is_forbidden_for_users() {
    let harness = TestHarness::new();
    harness.register_player().await;

    let response = harness
        .server
        .get("/v1/admin/stats")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_forbidden();
}
