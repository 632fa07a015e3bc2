//! Configuration loading for the TUI.
//!
//! Responsibilities:
//! - Load configuration with CLI and environment variable overrides.
//! - Resolve the display state store and load persisted state.
//! - Build the log filter from `RUST_LOG`, falling back to info for our crates.
//!
//! Does NOT handle:
//! - Creating the hub client (see `runtime::client`).
//! - Terminal state management (see `runtime::terminal`).
//!
//! Invariants:
//! - Configuration precedence: CLI args > env vars > `.env` file > defaults.
//! - `load_dotenv()` is called before reading the environment.

use std::time::Duration;

use anyhow::{Context, Result};
use hub_config::constants::DEFAULT_LOG_FILTER;
use hub_config::{Config, ConfigLoader, PersistedState, StateStore};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Load the connection and session configuration.
///
/// # Errors
///
/// Returns an error if the `.env` file is malformed, an environment value is
/// invalid, or the base URL, user or API token is missing.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new().load_dotenv()?.from_env()?;

    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url(base_url.clone());
    }
    if let Some(user) = &cli.user {
        loader = loader.with_user(user.clone());
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }
    if let Some(vo) = &cli.vo {
        loader = loader.with_vo(vo.clone());
    }
    if let Some(systems) = &cli.systems {
        loader = loader.with_available_systems(systems.clone());
    }
    if let Some(path) = &cli.state_path {
        loader = loader.with_state_path(path.clone());
    }
    if let Some(service) = &cli.log_service {
        loader = loader.with_log_service(service.clone());
    }

    loader.build().context("Failed to load hub configuration")
}

/// Filter from `RUST_LOG`, or `DEFAULT_LOG_FILTER` when it is unset or invalid.
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Resolve where display state lives: the configured path, else the
/// platform config directory.
pub fn state_store(config: &Config) -> Result<StateStore> {
    match &config.session.state_path {
        Some(path) => Ok(StateStore::new(path.clone())),
        None => StateStore::default_location().context("Failed to locate the state directory"),
    }
}

/// Load persisted state unless `--fresh` was given.
pub fn load_persisted_state(cli: &Cli, store: &StateStore) -> Option<PersistedState> {
    if cli.fresh {
        tracing::info!("Starting with fresh state (--fresh)");
        None
    } else {
        Some(store.load())
    }
}
