//! Configuration management for the hub TUI.
//!
//! This crate provides types and loaders for the hub connection settings
//! (environment variables and `.env` files) and the persisted display state.

pub mod constants;
mod loader;
pub mod persistence;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use persistence::{PersistedState, StateStore, TabPage};
pub use types::{AuthConfig, Config, ConnectionConfig, SessionConfig};
