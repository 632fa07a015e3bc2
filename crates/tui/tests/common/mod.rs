//! Common test utilities for TUI side effects and listener tests.
//!
//! This module provides shared helper functions and types for testing the TUI's
//! async side effect handlers. It uses wiremock to mock the hub's REST API
//! and event streams.
//!
//! # Invariants
//! - Fixtures are loaded from the client's fixtures directory
//! - All mock servers use random available ports to avoid conflicts
//! - Each test gets its own isolated mock server, action channel and state file
//!
//! # What this does NOT handle
//! - Actual HTTP requests to a real hub
//! - TUI rendering or terminal management

// Allow dead code since not all tests use all utilities
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

// Re-export commonly used types for test convenience
pub use hub_client::HubClient;
pub use hub_config::{Config, StateStore};
pub use hub_tui::action::{Action, Effect};
pub use hub_tui::runtime::side_effects::{
    SharedClient, SharedStateStore, TaskTracker, handle_side_effects,
};
pub use tokio::sync::mpsc::{Receiver, Sender};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Load a JSON fixture file from the client's fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir
        .parent()
        .expect("No parent directory")
        .join("client")
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// An event-stream response with the given raw body.
pub fn sse_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "text/event-stream")
        .set_body_string(body.to_string())
}

/// A client for user `alice` pointed at `uri`.
pub fn create_test_client(uri: &str) -> SharedClient {
    let config = Config::with_token(uri.to_string(), "alice".to_string(), "test-token".to_string());
    Arc::new(
        HubClient::builder()
            .from_config(&config)
            .build()
            .expect("Failed to create test client"),
    )
}

/// Test harness for side effects testing.
///
/// Provides a mock HTTP server, action channel, shared client and a state
/// store in a temporary directory.
pub struct SideEffectsTestHarness {
    pub mock_server: MockServer,
    pub action_rx: Receiver<Action>,
    pub action_tx: Sender<Action>,
    pub client: SharedClient,
    pub state_store: SharedStateStore,
    pub task_tracker: TaskTracker,
    _state_dir: tempfile::TempDir,
}

impl SideEffectsTestHarness {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let (action_tx, action_rx) = mpsc::channel::<Action>(100);
        let client = create_test_client(&mock_server.uri());
        let state_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state_store = Arc::new(StateStore::new(state_dir.path().join("state.json")));

        Self {
            mock_server,
            action_rx,
            action_tx,
            client,
            state_store,
            task_tracker: TaskTracker::new(),
            _state_dir: state_dir,
        }
    }

    /// Run an effect and collect every action sent within `timeout_secs`.
    ///
    /// `handle_side_effects` must return promptly; a blocking await fails the
    /// test.
    pub async fn handle_and_collect(&mut self, effect: Effect, timeout_secs: u64) -> Vec<Action> {
        let handle_future = handle_side_effects(
            effect,
            self.client.clone(),
            self.action_tx.clone(),
            self.state_store.clone(),
            self.task_tracker.clone(),
        );
        if tokio::time::timeout(Duration::from_millis(100), handle_future)
            .await
            .is_err()
        {
            panic!("handle_side_effects timed out - it may be blocking instead of spawning tasks");
        }

        tokio::task::yield_now().await;

        let mut actions = Vec::new();
        let deadline = tokio::time::Instant::now() + Duration::from_secs(timeout_secs);
        while tokio::time::Instant::now() < deadline {
            match tokio::time::timeout(Duration::from_millis(100), self.action_rx.recv()).await {
                Ok(Some(action)) => actions.push(action),
                Ok(None) => break,
                Err(_) => tokio::task::yield_now().await,
            }
        }
        actions
    }

    /// Wait for the next action, failing after `timeout_ms`.
    pub async fn expect_action(&mut self, timeout_ms: u64) -> Action {
        tokio::time::timeout(Duration::from_millis(timeout_ms), self.action_rx.recv())
            .await
            .expect("Timed out waiting for action")
            .expect("Action channel closed")
    }
}
