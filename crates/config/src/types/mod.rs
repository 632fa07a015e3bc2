//! Configuration type definitions for the hub TUI.
//!
//! Responsibilities:
//! - Define configuration types for the hub connection, authentication and session scope.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Configuration loading from environment variables (see `loader` module).
//! - Persisted UI state (see `persistence` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization helpers (`secret_string`, `duration_seconds`) are private modules.

mod auth;
mod connection;
mod session;

pub use auth::AuthConfig;
pub use connection::{Config, ConnectionConfig};
pub use session::SessionConfig;
