//! Application state and rendering.
//!
//! This module contains the server list view-model, its input handling,
//! and rendering logic for the TUI.
//!
//! The module is organized into submodules:
//! - `state`: Screen, focus, alert and edit types
//! - `form`: Configuration form and option serialization
//! - `row`: Row control visibility and enablement
//! - `validation`: Pre-submit form validation
//! - `warnings`: Per-field and per-tab warning badges
//! - `progress`: Spawn progress bar and log
//! - `registry`: Option snapshots and progress subscriptions
//! - `servers`: Per-server view state and the new-server dialog
//! - `logging`: Logging handler screen state
//! - `actions`: Action handling, producing side effects
//! - `input` / `mouse`: Key and mouse handling
//! - `render`: Rendering logic

pub mod form;
pub mod logging;
pub mod progress;
pub mod registry;
pub mod row;
pub mod servers;
pub mod state;
pub mod validation;
pub mod warnings;

mod actions;
mod core;
mod input;
mod mouse;
mod render;
mod structs;

pub use state::{CurrentScreen, FOOTER_HEIGHT, Focus, HEADER_HEIGHT};
pub use structs::{App, ConnectionContext};
