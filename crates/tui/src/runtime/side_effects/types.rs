//! Shared types for side effect handlers.
//!
//! This module contains type aliases and shared definitions used across
//! all side effect handler submodules.

use std::sync::Arc;

use hub_client::HubClient;
use hub_config::StateStore;

/// Shared client wrapper for async tasks.
///
/// Every `HubClient` method takes `&self`, so tasks share one client
/// without a lock.
pub type SharedClient = Arc<HubClient>;

/// Shared handle to the persisted display state file.
pub type SharedStateStore = Arc<StateStore>;
