//! Core App lifecycle methods.
//!
//! Responsibilities:
//! - App construction (new, default)
//! - Lookup helpers for the selected server and the new-server dialog
//! - Toast and persistence helpers shared by the action handlers
//!
//! Does NOT handle:
//! - Does NOT handle runtime updates (see actions/)
//! - Does NOT handle input (see input.rs)
//! - Does NOT render (see render.rs)

use std::collections::BTreeMap;

use hub_config::constants::DEFAULT_LOG_SERVICE;
use hub_config::{PersistedState, TabPage};
use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use tokio_util::sync::CancellationToken;

use crate::action::Effect;
use crate::app::logging::LoggingState;
use crate::app::registry::SessionRegistry;
use crate::app::servers::ServerEntry;
use crate::app::state::{CurrentScreen, Focus};
use crate::app::structs::{App, ConnectionContext};
use crate::ui::theme::Theme;
use crate::ui::{Toast, ToastLevel};

impl Default for App {
    fn default() -> Self {
        Self::new(None, ConnectionContext::default())
    }
}

impl App {
    /// Create a new App instance.
    ///
    /// # Arguments
    ///
    /// * `persisted` - Optional persisted state from previous runs
    /// * `connection_ctx` - Hub URL, user and session scope
    pub fn new(persisted: Option<PersistedState>, connection_ctx: ConnectionContext) -> Self {
        Self::with_session_token(persisted, connection_ctx, CancellationToken::new())
    }

    /// Like [`App::new`], with progress subscriptions parented to `session`.
    ///
    /// Cancelling `session` ends every progress listener the app started.
    pub fn with_session_token(
        persisted: Option<PersistedState>,
        connection_ctx: ConnectionContext,
        session: CancellationToken,
    ) -> Self {
        let mut servers_state = TableState::default();
        servers_state.select(Some(0));

        let log_service = connection_ctx
            .session
            .log_service
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_SERVICE.to_string());

        Self {
            current_screen: CurrentScreen::Servers,
            focus: Focus::Table,
            base_url: connection_ctx.base_url,
            user: connection_ctx.user,
            session: connection_ctx.session,
            servers: BTreeMap::new(),
            servers_state,
            registry: SessionRegistry::new(session),
            new_server: None,
            edit: None,
            loading: false,
            logging: LoggingState::new(log_service),
            persisted: persisted.unwrap_or_default(),
            toasts: Vec::new(),
            spinner_frame: 0,
            theme: Theme::default(),
            show_help: false,
            last_area: Rect::default(),
        }
    }

    /// Name of the server under the table cursor.
    pub fn selected_server_name(&self) -> Option<String> {
        let index = self.servers_state.selected()?;
        self.servers.keys().nth(index).cloned()
    }

    pub fn selected_server(&self) -> Option<&ServerEntry> {
        let index = self.servers_state.selected()?;
        self.servers.values().nth(index)
    }

    /// Keep the table cursor inside the list after rows were added or removed.
    pub(crate) fn clamp_selection(&mut self) {
        let len = self.servers.len();
        let selected = match (len, self.servers_state.selected()) {
            (0, _) => None,
            (_, Some(i)) if i >= len => Some(len - 1),
            (_, Some(i)) => Some(i),
            (_, None) => Some(0),
        };
        self.servers_state.select(selected);
    }

    pub(crate) fn push_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toasts.push(Toast::new(level, message));
    }

    /// Record a panel as shown or hidden; returns the persist effect if the list changed.
    pub(crate) fn record_tab(&mut self, page: TabPage, id: &str, shown: bool) -> Option<Effect> {
        let changed = if shown {
            self.persisted.tab_shown(page, id)
        } else {
            self.persisted.tab_hidden(page, id)
        };
        changed.then(|| Effect::PersistState(self.persisted.clone()))
    }

    /// Whether any request is in flight for a row or the dialog.
    pub fn is_busy(&self) -> bool {
        self.loading
            || self.logging.loading
            || self.servers.values().any(|s| s.row.is_locked())
            || self.new_server.as_ref().is_some_and(|d| d.busy)
    }
}
