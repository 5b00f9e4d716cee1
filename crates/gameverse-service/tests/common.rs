//! Common test utilities for gameverse integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use gameverse_core::PlayerId;
use gameverse_service::{create_router, AppState, ServiceConfig};
use gameverse_store::RocksStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// A test player ID for authenticated requests.
    pub test_player_id: PlayerId,
    /// A test admin ID for privileged requests.
    pub test_admin_id: PlayerId,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RocksStore::open(temp_dir.path()).expect("Failed to open store");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(Arc::new(store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
            test_player_id: PlayerId::generate(),
            test_admin_id: PlayerId::generate(),
        }
    }

    /// Get the authorization header for user authentication.
    pub fn user_auth_header(&self) -> String {
        format!("Bearer test-token:{}", self.test_player_id)
    }

    /// Get the authorization header for admin authentication.
    pub fn admin_auth_header(&self) -> String {
        format!("Bearer test-admin:{}", self.test_admin_id)
    }

    /// Get an auth header for an arbitrary player (for testing isolation).
    pub fn auth_header_for(player_id: PlayerId) -> String {
        format!("Bearer test-token:{player_id}")
    }

    /// Register the default test player.
    pub async fn register_player(&self) {
        self.server
            .post("/v1/players")
            .add_header("authorization", self.user_auth_header())
            .json(&json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com"
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    /// Register the default test admin.
    pub async fn register_admin(&self) {
        self.server
            .post("/v1/players")
            .add_header("authorization", self.admin_auth_header())
            .json(&json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": "grace@example.com"
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    /// Add a game to the catalog as the test admin and return its id.
    pub async fn create_game(&self, title: &str, price: f64) -> String {
        let response = self
            .server
            .post("/v1/games")
            .add_header("authorization", self.admin_auth_header())
            .json(&json!({
                "title": title,
                "genre": "RPG",
                "rating": 4.5,
                "price": price
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        body["id"].as_str().expect("game id").to_string()
    }

    /// Credit the default test player's wallet.
    pub async fn credit_wallet(&self, amount: f64) {
        self.server
            .post("/v1/wallet/credit")
            .add_header("authorization", self.user_auth_header())
            .json(&json!({ "amount": amount }))
            .await
            .assert_status_ok();
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
