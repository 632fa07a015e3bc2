//! UI rendering modules for the TUI.
//!
//! This module contains screen-specific rendering logic that is separated
//! from the main app state management.

pub mod popup;
pub mod screens;
pub mod theme;
pub mod toast;

pub use toast::{Toast, ToastLevel};
