//! Keyed view state of the server list.
//!
//! Each named server owns one `ServerEntry`: the row controls, its
//! configuration panel and progress indicator. Entries are looked up by
//! name, never by parsing element ids.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use hub_client::ServerModel;
use hub_config::constants::DEFAULT_SERVER_NAME_PREFIX;
use hub_config::{PersistedState, SessionConfig, TabPage};
use url::Url;

use crate::app::form::{FormTab, ServerForm, TableCells};
use crate::app::progress::ProgressView;
use crate::app::row::RowControls;
use crate::app::state::Alert;
use crate::app::validation::ValidationFailure;
use crate::app::warnings::WarningState;

/// Persisted id of a server's configuration panel.
pub fn panel_id(name: &str) -> String {
    format!("{}-collapse", name)
}

/// Apply session restrictions to a form: allowed systems become the choices
/// of the system select.
pub fn apply_session(form: &mut ServerForm, session: &SessionConfig) {
    if let Some(systems) = &session.available_systems {
        form.set_choices("system", systems.clone());
    }
}

/// Browser URL of a running server.
///
/// `path` is the server path reported by the hub (`/user/alice/lab1/`); it
/// replaces the path of `base_url`.
pub fn browser_url(base_url: &str, path: &str) -> Result<String, url::ParseError> {
    Ok(Url::parse(base_url)?.join(path)?.to_string())
}

/// View state of one named server.
#[derive(Debug, Clone)]
pub struct ServerEntry {
    pub name: String,
    pub row: RowControls,
    pub form: ServerForm,
    pub warnings: WarningState,
    pub progress: ProgressView,
    pub cells: TableCells,
    /// Configuration panel is expanded.
    pub expanded: bool,
    pub active_tab: FormTab,
    pub focused_field: Option<&'static str>,
    /// Path of the running server, as reported by the hub.
    pub url: Option<String>,
    /// A spawn is in progress; the stop control cancels it.
    pub spawn_pending: bool,
    /// Save and reset are enabled.
    pub save_enabled: bool,
    pub alert: Option<Alert>,
    pub show_log: bool,
    pub last_activity: Option<DateTime<Utc>>,
}

impl ServerEntry {
    pub fn from_model(model: &ServerModel, session: &SessionConfig) -> Self {
        let mut form = ServerForm::from_options(&model.user_options);
        apply_session(&mut form, session);
        let not_applicable = !session.is_system_available(form.value("system"));
        let warnings = WarningState::from_form(&form);
        let cells = form.cells();

        let mut row = RowControls::with_state(not_applicable, model.is_running());
        if model.ready {
            row.mark_ready();
        }

        Self {
            name: model.name.clone(),
            row,
            form,
            warnings,
            progress: ProgressView::default(),
            cells,
            expanded: false,
            active_tab: FormTab::Service,
            focused_field: None,
            url: model.url.clone(),
            spawn_pending: model.is_spawn_pending(),
            save_enabled: false,
            alert: None,
            show_log: false,
            last_activity: model.last_activity,
        }
    }

    pub fn panel_id(&self) -> String {
        panel_id(&self.name)
    }

    /// Show the field that failed validation: select its tab, expand the
    /// panel and flag the field.
    pub fn reveal(&mut self, failure: &ValidationFailure) {
        self.expanded = true;
        self.active_tab = failure.tab;
        self.focused_field = Some(failure.field);
        self.warnings.set_warning(failure.field);
        self.alert = Some(Alert::error(failure.to_string()));
    }

    /// Copy the form's system, partition and project into the table cells.
    pub fn update_cells(&mut self) {
        self.cells = self.form.cells();
    }

    /// Status label for the table.
    pub fn status(&self) -> &'static str {
        if self.row.is_locked() {
            "working"
        } else if self.spawn_pending {
            "starting"
        } else if self.row.is_running() {
            "running"
        } else if self.row.not_applicable() {
            "n/a"
        } else {
            "stopped"
        }
    }
}

/// First `jupyterlab_{c}` (c >= 1) not used by any existing server.
pub fn next_default_name<'a>(existing: impl Iterator<Item = &'a str>) -> String {
    let used: HashSet<&str> = existing.collect();
    (1usize..)
        .map(|c| format!("{}{}", DEFAULT_SERVER_NAME_PREFIX, c))
        .find(|candidate| !used.contains(candidate.as_str()))
        .unwrap_or_else(|| DEFAULT_SERVER_NAME_PREFIX.to_string())
}

/// State of the "new server" dialog.
#[derive(Debug, Clone, Default)]
pub struct NewServerDialog {
    pub name_input: String,
    pub form: ServerForm,
    pub warnings: WarningState,
    pub active_tab: FormTab,
    pub focused_field: Option<&'static str>,
    /// A start request is in flight.
    pub busy: bool,
    pub alert: Option<Alert>,
}

impl NewServerDialog {
    /// Empty dialog opened on the tab that was last shown.
    pub fn new(session: &SessionConfig, persisted: &PersistedState) -> Self {
        let mut form = ServerForm::new();
        apply_session(&mut form, session);
        let active_tab = persisted
            .open_tabs(TabPage::Spawn)
            .last()
            .and_then(|id| FormTab::from_id(id))
            .unwrap_or_default();
        Self {
            form,
            active_tab,
            ..Self::default()
        }
    }

    pub fn reveal(&mut self, failure: &ValidationFailure) {
        self.active_tab = failure.tab;
        self.focused_field = Some(failure.field);
        self.warnings.set_warning(failure.field);
        self.alert = Some(Alert::error(failure.to_string()));
    }
}
