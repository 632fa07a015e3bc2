//! App struct definitions.
//!
//! Responsibilities:
//! - Define the main App struct and its fields
//! - Define ConnectionContext for connection info
//!
//! Does NOT handle:
//! - Does NOT implement behavior methods (see core.rs, actions/, input.rs)
//! - Does NOT handle state mutations directly

use std::collections::BTreeMap;

use hub_config::{PersistedState, SessionConfig};
use ratatui::layout::Rect;
use ratatui::widgets::TableState;

use crate::app::logging::LoggingState;
use crate::app::registry::SessionRegistry;
use crate::app::servers::{NewServerDialog, ServerEntry};
use crate::app::state::{CurrentScreen, FieldEdit, Focus};
use crate::ui::Toast;
use crate::ui::theme::Theme;

/// Main application state: the server list view-model plus screen chrome.
pub struct App {
    pub current_screen: CurrentScreen,
    pub focus: Focus,

    /// Hub base URL including its prefix, without trailing slash.
    pub base_url: String,
    pub user: String,
    pub session: SessionConfig,

    /// Server rows keyed by name. Iteration order is the display order.
    pub servers: BTreeMap<String, ServerEntry>,
    pub servers_state: TableState,
    pub registry: SessionRegistry,
    pub new_server: Option<NewServerDialog>,
    pub edit: Option<FieldEdit>,
    pub loading: bool,

    pub logging: LoggingState,

    /// Open panels and tabs, written back through `Effect::PersistState`.
    pub persisted: PersistedState,

    pub toasts: Vec<Toast>,
    pub spinner_frame: u8,
    pub theme: Theme,
    pub show_help: bool,

    // Layout tracking
    pub last_area: Rect,
}

/// Connection context for the header and URL building.
#[derive(Debug, Clone, Default)]
pub struct ConnectionContext {
    pub base_url: String,
    pub user: String,
    pub session: SessionConfig,
}
