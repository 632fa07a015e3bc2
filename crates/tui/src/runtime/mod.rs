//! Runtime components for the TUI application.
//!
//! This module contains the runtime infrastructure for the TUI:
//! - Terminal management (TerminalGuard)
//! - Client creation
//! - Configuration loading
//! - Async side effect handlers for hub requests
//! - Notification and progress event listeners
//!
//! Does NOT handle:
//! - UI rendering or input handling (see `hub_tui::app` and `hub_tui::ui`).
//! - Hub protocol details (see `hub_client`).
//!
//! Invariants:
//! - All modules are initialized during application startup in `main()`.
//! - Side effects and listeners run on one task tracker that `main()` drains on exit.

pub mod client;
pub mod config;
pub mod side_effects;
pub mod streams;
pub mod terminal;
