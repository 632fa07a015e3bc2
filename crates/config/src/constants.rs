//! Centralized constants for the hub TUI workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Named Server Defaults
// =============================================================================

/// Service requested for every spawn. The hub only offers JupyterLab here.
pub const DEFAULT_SERVICE: &str = "JupyterLab";

/// The runtime field is entered in minutes but stored in seconds.
pub const RUNTIME_SECONDS_PER_MINUTE: i64 = 60;

/// Prefix for auto-generated server names (`jupyterlab_1`, `jupyterlab_2`, ...).
pub const DEFAULT_SERVER_NAME_PREFIX: &str = "jupyterlab_";

/// Logging subsystem name of the hub itself.
pub const DEFAULT_LOG_SERVICE: &str = "jhub";

// =============================================================================
// Event Stream Defaults
// =============================================================================

/// Reconnect delay for server-sent event streams when the server sends no `retry:` field.
pub const DEFAULT_SSE_RETRY_MS: u64 = 3000;

// =============================================================================
// Runtime Defaults
// =============================================================================

/// Capacity of the action channel between side effects and the UI loop.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// UI tick interval in milliseconds (spinner animation, toast expiry).
pub const DEFAULT_UI_TICK_MS: u64 = 250;

/// Log filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "hub_tui=info,hub_client=info";

/// How long toast notifications stay visible, in seconds.
pub const DEFAULT_TOAST_TTL_SECS: u64 = 5;

// =============================================================================
// Persistence
// =============================================================================

/// Application name used for platform directories.
pub const APP_NAME: &str = "hub-tui";

/// File name of the persisted UI state inside the config directory.
pub const STATE_FILE_NAME: &str = "state.json";
