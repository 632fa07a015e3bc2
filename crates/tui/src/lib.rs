//! Hub TUI Library
//!
//! This library provides the server list view-model, its runtime and the
//! UI components for the hub terminal user interface.
//!
//! # Example
//!
//! ```rust
//! use hub_tui::{App, Action};
//! use crossterm::event::KeyEvent;
//!
//! let mut app = App::default();
//! if let Some(action) = app.handle_input(KeyEvent::from(crossterm::event::KeyCode::Char('q'))) {
//!     assert!(matches!(action, Action::Quit));
//! }
//! ```

pub mod action;
pub mod app;
pub mod cli;
pub mod runtime;
pub mod ui;

// Re-export commonly used types at the crate root
pub use action::{Action, Effect};
pub use app::{App, CurrentScreen, FOOTER_HEIGHT, HEADER_HEIGHT};
pub use ui::toast::{Toast, ToastLevel};
