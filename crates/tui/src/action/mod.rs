//! Action protocol for async TUI event handling.
//!
//! # Module Structure
//!
//! - `variants`: Action enum definitions (`Action`)
//! - `effect`: side effects requested by the view-model (`Effect`)
//! - `redaction`: Security-focused logging wrapper (`RedactedAction`)
//!
//! # What This Module Does NOT Handle
//!
//! - Action handling logic (handled by `App::update`)
//! - Async task execution (handled by the runtime module)
//! - UI rendering (handled by the ui module)

pub mod effect;
pub mod redaction;
pub mod variants;

pub use effect::Effect;
pub use redaction::RedactedAction;
pub use variants::{
    Action, ActionResult, HandlerOperation, ServerOperation, StartOrigin,
};
