//! UI screen rendering modules.
//!
//! This module contains screen-specific rendering logic.

pub mod logging;
pub mod servers;
