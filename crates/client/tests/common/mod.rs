//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON

use std::path::Path;

#[allow(unused_imports)]
pub use hub_client::endpoints;
#[allow(unused_imports)]
pub use hub_client::{ClientError, HubClient};
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token used by every test client.
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-token";

/// Load a JSON fixture from `fixtures/`.
#[allow(dead_code)]
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// A client for user `alice` pointed at the mock server.
#[allow(dead_code)]
pub fn test_client(mock_server: &MockServer) -> HubClient {
    HubClient::builder()
        .base_url(mock_server.uri())
        .user("alice".to_string())
        .token(secrecy::SecretString::new(TEST_TOKEN.to_string().into()))
        .build()
        .expect("client builds")
}
