//! Async side effect handlers for TUI effects.
//!
//! Responsibilities:
//! - Run the HTTP requests and local operations `App::update` asks for.
//! - Spawn each one on the shared task tracker so the UI loop never blocks.
//! - Send results back via the action channel for state updates.
//!
//! Does NOT handle:
//! - Direct application state modification (sends actions to do that).
//! - UI rendering or terminal management.
//! - Retrying failed requests; every retry is a new user gesture.
//!
//! Invariants:
//! - Every request effect produces exactly one result action.
//! - Progress listeners stop when their cancellation token fires.

mod dispatcher;
mod local;
mod logging;
mod servers;
mod types;

pub use dispatcher::handle_side_effects;
pub use local::drain_and_save;
pub use tokio_util::task::TaskTracker;
pub use types::{SharedClient, SharedStateStore};
