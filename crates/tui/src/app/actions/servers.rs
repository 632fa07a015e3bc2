//! User intents on server rows, configuration panels and the new-server dialog.
//!
//! Responsibilities:
//! - Lock the row before a request effect is emitted
//! - Serialize the form and gate submissions on local validation
//! - Track unsaved changes against the stored option snapshot
//!
//! Non-responsibilities:
//! - Does NOT handle request results (see results.rs)
//!
//! Invariants:
//! - A locked row emits no further request effects.
//! - A form that fails validation never produces a request effect.

use hub_client::endpoints;
use hub_config::TabPage;
use tracing::{debug, warn};

use crate::action::{Action, Effect, ServerOperation, StartOrigin};
use crate::app::App;
use crate::app::form::FormTab;
use crate::app::row::RowControl;
use crate::app::servers::{NewServerDialog, browser_url, next_default_name};
use crate::app::state::{Alert, Focus};
use crate::app::validation::validate;
use crate::app::warnings::tab_disabled;
use crate::ui::ToastLevel;

impl App {
    pub(super) fn handle_server_intent(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::LoadServers => {
                self.loading = true;
                vec![Effect::LoadServers]
            }
            Action::StartServer(name) => self.start_server(name),
            Action::StartNewServer => self.start_new_server(),
            Action::OpenNewServerDialog => {
                self.new_server = Some(NewServerDialog::new(&self.session, &self.persisted));
                Vec::new()
            }
            Action::CloseNewServerDialog => {
                self.new_server = None;
                self.edit = None;
                Vec::new()
            }
            Action::StopServer(name) => self.server_operation(name, ServerOperation::Stop),
            Action::CancelServer(name) => self.server_operation(name, ServerOperation::Cancel),
            Action::DeleteServer(name) => self.server_operation(name, ServerOperation::Delete),
            Action::SaveChanges(name) => self.save_changes(name),
            Action::RevertChanges(name) => self.revert_changes(name),
            Action::OpenServer(name) => self.open_server(&name),
            Action::ShowProgressLog(name) => {
                if let Some(entry) = self.servers.get_mut(&name) {
                    entry.show_log = !entry.show_log;
                }
                Vec::new()
            }
            Action::ToggleRow(name) => self.toggle_row(&name),
            Action::EditField { name, param, value } => {
                self.edit_field(name.as_deref(), param, value);
                Vec::new()
            }
            Action::FocusField { name, param } => {
                match name {
                    Some(name) => {
                        if let Some(entry) = self.servers.get_mut(&name) {
                            entry.focused_field = Some(param);
                            entry.warnings.on_field_focus(param);
                        }
                    }
                    None => {
                        if let Some(dialog) = self.new_server.as_mut() {
                            dialog.focused_field = Some(param);
                            dialog.warnings.on_field_focus(param);
                        }
                    }
                }
                Vec::new()
            }
            Action::ClickTab { name, tab } => self.click_tab(name.as_deref(), tab),
            Action::SetNewServerName(value) => {
                if let Some(dialog) = self.new_server.as_mut() {
                    dialog.name_input = value;
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn start_server(&mut self, name: String) -> Vec<Effect> {
        let vo = self.session.vo.clone();
        let Some(entry) = self.servers.get_mut(&name) else {
            return Vec::new();
        };
        if !entry.row.is_enabled(RowControl::Start) {
            debug!(server = %name, "start ignored, control not enabled");
            return Vec::new();
        }

        entry.row.disable_row();
        entry.update_cells();
        let query = entry.form.to_query_string(vo.as_deref());
        let spawn_url = endpoints::spawn_url(&self.base_url, &self.user, &name, &query);
        let options = entry.form.to_user_options(vo.as_deref());

        if let Err(failure) = validate(&entry.form) {
            debug!(server = %name, field = failure.field, "start blocked by validation");
            entry.row.set_row_state(false);
            entry.reveal(&failure);
            let panel = entry.panel_id();
            return self.record_tab(TabPage::Home, &panel, true).into_iter().collect();
        }

        entry.progress.reset();
        entry.alert = None;
        entry.spawn_pending = true;
        entry.row.set_row_state(true);

        vec![Effect::StartServer {
            name,
            options,
            spawn_url,
            origin: StartOrigin::Row,
        }]
    }

    fn start_new_server(&mut self) -> Vec<Effect> {
        let vo = self.session.vo.clone();
        let Some(dialog) = self.new_server.as_mut() else {
            return Vec::new();
        };
        if dialog.busy {
            return Vec::new();
        }

        let name = match dialog.name_input.trim() {
            "" => next_default_name(self.servers.keys().map(String::as_str)),
            typed => typed.to_string(),
        };

        if let Err(failure) = validate(&dialog.form) {
            debug!(server = %name, field = failure.field, "new server blocked by validation");
            dialog.reveal(&failure);
            return Vec::new();
        }

        let query = dialog.form.to_query_string(vo.as_deref());
        let spawn_url = endpoints::spawn_url(&self.base_url, &self.user, &name, &query);
        let options = dialog.form.to_user_options(vo.as_deref());
        dialog.busy = true;
        dialog.alert = Some(Alert::info(format!("Waiting for {} to start...", name)));

        vec![Effect::StartServer {
            name,
            options,
            spawn_url,
            origin: StartOrigin::NewServerDialog,
        }]
    }

    fn server_operation(&mut self, name: String, operation: ServerOperation) -> Vec<Effect> {
        let Some(entry) = self.servers.get_mut(&name) else {
            return Vec::new();
        };
        let allowed = match operation {
            ServerOperation::Stop => entry.row.is_enabled(RowControl::Stop),
            // A pending spawn can be cancelled before stop is enabled.
            ServerOperation::Cancel => !entry.row.is_locked() && entry.row.is_running(),
            ServerOperation::Delete => entry.row.is_enabled(RowControl::Delete),
        };
        if !allowed {
            debug!(server = %name, operation = operation.verb(), "operation ignored");
            return Vec::new();
        }

        entry.row.disable_row();
        entry.alert = None;
        vec![Effect::ServerOperation { name, operation }]
    }

    fn save_changes(&mut self, name: String) -> Vec<Effect> {
        let vo = self.session.vo.clone();
        let Some(entry) = self.servers.get_mut(&name) else {
            return Vec::new();
        };
        if !entry.save_enabled || entry.row.is_locked() {
            return Vec::new();
        }

        if let Err(failure) = validate(&entry.form) {
            entry.reveal(&failure);
            let panel = entry.panel_id();
            return self.record_tab(TabPage::Home, &panel, true).into_iter().collect();
        }

        entry.row.disable_row();
        let options = entry.form.to_user_options(vo.as_deref());
        vec![Effect::UpdateServer {
            name,
            options,
            revert: false,
        }]
    }

    fn revert_changes(&mut self, name: String) -> Vec<Effect> {
        let options = self.registry.snapshot(&name).cloned().unwrap_or_default();
        let Some(entry) = self.servers.get_mut(&name) else {
            return Vec::new();
        };
        if !entry.save_enabled || entry.row.is_locked() {
            return Vec::new();
        }

        entry.row.disable_row();
        vec![Effect::UpdateServer {
            name,
            options,
            revert: true,
        }]
    }

    fn open_server(&mut self, name: &str) -> Vec<Effect> {
        let Some(entry) = self.servers.get(name) else {
            return Vec::new();
        };
        if !entry.row.is_enabled(RowControl::Open) {
            return Vec::new();
        }
        let Some(path) = entry.url.clone() else {
            self.push_toast(ToastLevel::Warning, format!("{} has no URL yet", name));
            return Vec::new();
        };

        match browser_url(&self.base_url, &path) {
            Ok(url) => vec![Effect::OpenUrl(url)],
            Err(e) => {
                warn!(server = %name, error = %e, "could not build server URL");
                self.push_toast(ToastLevel::Error, format!("Invalid server URL: {}", e));
                Vec::new()
            }
        }
    }

    fn toggle_row(&mut self, name: &str) -> Vec<Effect> {
        let Some(entry) = self.servers.get_mut(name) else {
            return Vec::new();
        };
        entry.expanded = !entry.expanded;
        let expanded = entry.expanded;
        let panel = entry.panel_id();
        if !expanded {
            self.focus = Focus::Table;
        }
        self.record_tab(TabPage::Home, &panel, expanded)
            .into_iter()
            .collect()
    }

    fn edit_field(&mut self, name: Option<&str>, param: &'static str, value: Option<String>) {
        match name {
            Some(name) => {
                let Some(entry) = self.servers.get_mut(name) else {
                    return;
                };
                if !entry.form.set_value(param, value) {
                    return;
                }
                entry.warnings.on_field_focus(param);
                entry.save_enabled = match self.registry.snapshot(name) {
                    Some(snapshot) => entry.form.differs_from(snapshot),
                    None => entry.form.differs_from(&Default::default()),
                };
            }
            None => {
                if let Some(dialog) = self.new_server.as_mut()
                    && dialog.form.set_value(param, value)
                {
                    dialog.warnings.on_field_focus(param);
                }
            }
        }
    }

    fn click_tab(&mut self, name: Option<&str>, tab: FormTab) -> Vec<Effect> {
        match name {
            Some(name) => {
                if let Some(entry) = self.servers.get_mut(name)
                    && !tab_disabled(tab, &entry.form)
                {
                    entry.active_tab = tab;
                    entry.warnings.on_tab_click(&entry.form);
                }
                Vec::new()
            }
            None => {
                let Some(dialog) = self.new_server.as_mut() else {
                    return Vec::new();
                };
                if tab_disabled(tab, &dialog.form) {
                    return Vec::new();
                }
                let previous = dialog.active_tab;
                dialog.active_tab = tab;
                dialog.warnings.on_tab_click(&dialog.form);

                let hidden = previous != tab
                    && self.persisted.tab_hidden(TabPage::Spawn, previous.id());
                let shown = self.persisted.tab_shown(TabPage::Spawn, tab.id());
                if hidden || shown {
                    vec![Effect::PersistState(self.persisted.clone())]
                } else {
                    Vec::new()
                }
            }
        }
    }
}
