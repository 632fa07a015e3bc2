//! Responses to server requests.
//!
//! Every result unlocks the row it belongs to. Failures return the row to
//! the state it had before the request and show the HTTP status and reason
//! inline; nothing is retried.

use std::collections::BTreeMap;

use hub_client::{UserModel, UserOptions};
use hub_config::TabPage;
use tracing::{debug, error};

use crate::action::{Action, ActionResult, Effect, ServerOperation, StartOrigin};
use crate::app::App;
use crate::app::form::FormTab;
use crate::app::progress::ProgressPhase;
use crate::app::servers::{ServerEntry, panel_id};
use crate::app::state::{Alert, EditTarget, Focus};
use crate::ui::ToastLevel;

impl App {
    pub(super) fn handle_server_result(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::ServersLoaded(Ok(user)) => self.servers_loaded(user),
            Action::ServersLoaded(Err(e)) => {
                self.loading = false;
                error!(error = %e, "failed to load servers");
                self.push_toast(ToastLevel::Error, format!("Failed to load servers: {}", e));
                Vec::new()
            }
            Action::StartFinished {
                name,
                spawn_url,
                origin: StartOrigin::Row,
                result,
            } => self.row_start_finished(name, spawn_url, result),
            Action::StartFinished {
                name,
                spawn_url,
                origin: StartOrigin::NewServerDialog,
                result,
            } => self.dialog_start_finished(name, spawn_url, result),
            Action::ServerOperationFinished {
                name,
                operation,
                result,
            } => self.operation_finished(name, operation, result),
            Action::UpdateFinished {
                name,
                options,
                revert,
                result,
            } => {
                self.update_finished(name, options, revert, result);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn servers_loaded(&mut self, user: UserModel) -> Vec<Effect> {
        self.loading = false;
        let mut effects = Vec::new();
        let mut servers = BTreeMap::new();

        for (name, model) in user.servers {
            // The default server has an empty name and is not listed.
            if name.is_empty() {
                continue;
            }
            let mut entry = ServerEntry::from_model(&model, &self.session);
            entry.name = name.clone();
            if let Some(previous) = self.servers.remove(&name) {
                entry.progress = previous.progress;
                entry.alert = previous.alert;
                entry.show_log = previous.show_log;
                entry.active_tab = previous.active_tab;
            }
            let panel = entry.panel_id();
            entry.expanded = self
                .persisted
                .open_tabs(TabPage::Home)
                .iter()
                .any(|t| *t == panel);
            self.registry.set_snapshot(&name, model.user_options);

            if entry.spawn_pending
                && let Some(token) = self.registry.subscribe(&name)
            {
                if entry.progress.phase == ProgressPhase::Idle {
                    entry.progress.reset();
                }
                effects.push(Effect::SubscribeProgress {
                    name: name.clone(),
                    token,
                });
            }
            servers.insert(name, entry);
        }

        for gone in self.servers.keys() {
            debug!(server = %gone, "server no longer reported by the hub");
            self.registry.remove(gone);
        }
        self.servers = servers;
        self.clamp_selection();

        let before = self.persisted.home_tabs.len();
        let panels: Vec<String> = self.servers.values().map(ServerEntry::panel_id).collect();
        self.persisted
            .retain_known(TabPage::Home, panels.iter().map(String::as_str));
        if self.persisted.home_tabs.len() != before {
            effects.push(Effect::PersistState(self.persisted.clone()));
        }
        effects
    }

    fn row_start_finished(
        &mut self,
        name: String,
        spawn_url: String,
        result: ActionResult<()>,
    ) -> Vec<Effect> {
        match result {
            Ok(()) => {
                let mut effects = vec![Effect::OpenUrl(spawn_url)];
                if let Some(token) = self.registry.subscribe(&name) {
                    effects.push(Effect::SubscribeProgress { name, token });
                }
                effects
            }
            Err(e) => {
                if let Some(entry) = self.servers.get_mut(&name) {
                    let message =
                        format!("Could not request spawn. Error: {}", e.status_and_reason());
                    entry.progress.fail(message.clone());
                    entry.alert = Some(Alert::error(message));
                    entry.spawn_pending = false;
                    entry.row.set_row_state(false);
                }
                Vec::new()
            }
        }
    }

    fn dialog_start_finished(
        &mut self,
        name: String,
        spawn_url: String,
        result: ActionResult<()>,
    ) -> Vec<Effect> {
        match result {
            Ok(()) => {
                self.new_server = None;
                if matches!(
                    self.edit.as_ref().map(|e| &e.target),
                    Some(EditTarget::NewServerName | EditTarget::Field { name: None, .. })
                ) {
                    self.edit = None;
                }
                self.loading = true;
                vec![Effect::OpenUrl(spawn_url), Effect::LoadServers]
            }
            Err(e) => {
                let message = format!("Could not start {}. Error: {}", name, e.status_and_reason());
                match self.new_server.as_mut() {
                    Some(dialog) => {
                        dialog.busy = false;
                        dialog.alert = Some(Alert::error(message));
                    }
                    None => self.push_toast(ToastLevel::Error, message),
                }
                Vec::new()
            }
        }
    }

    fn operation_finished(
        &mut self,
        name: String,
        operation: ServerOperation,
        result: ActionResult<()>,
    ) -> Vec<Effect> {
        if let Err(e) = result {
            if let Some(entry) = self.servers.get_mut(&name) {
                entry.row.restore();
                entry.alert = Some(Alert::error(format!(
                    "Could not {} {}. Error: {}",
                    operation.verb(),
                    name,
                    e.status_and_reason()
                )));
            }
            return Vec::new();
        }

        if operation == ServerOperation::Delete {
            return self.remove_server(&name);
        }

        if let Some(entry) = self.servers.get_mut(&name) {
            entry.spawn_pending = false;
            entry.row.set_row_state(false);
            match operation {
                ServerOperation::Stop => entry.url = None,
                ServerOperation::Cancel => {
                    if entry.progress.phase == ProgressPhase::Succeeded {
                        entry.progress.clear_bar();
                    }
                }
                ServerOperation::Delete => {}
            }
        }
        Vec::new()
    }

    /// Drop a deleted server's row, panel, snapshot and subscription.
    fn remove_server(&mut self, name: &str) -> Vec<Effect> {
        self.servers.remove(name);
        self.registry.remove(name);
        if matches!(
            self.edit.as_ref().map(|e| &e.target),
            Some(EditTarget::Field { name: Some(n), .. }) if n == name
        ) {
            self.edit = None;
        }
        self.clamp_selection();
        if self.selected_server().is_none_or(|s| !s.expanded) {
            self.focus = Focus::Table;
        }
        self.push_toast(ToastLevel::Success, format!("Deleted {}.", name));
        self.record_tab(TabPage::Home, &panel_id(name), false)
            .into_iter()
            .collect()
    }

    fn update_finished(
        &mut self,
        name: String,
        options: UserOptions,
        revert: bool,
        result: ActionResult<()>,
    ) {
        let Some(entry) = self.servers.get_mut(&name) else {
            return;
        };
        entry.row.restore();

        if let Err(e) = result {
            entry.alert = Some(Alert::error(format!(
                "Could not update {}. Error: {}",
                name,
                e.status_and_reason()
            )));
            return;
        }

        if revert {
            entry.form.set_values(&options);
            entry.warnings.clear();
            entry.active_tab = FormTab::Service;
            entry.alert = Some(Alert::success(format!(
                "Successfully reverted settings back for {}.",
                name
            )));
        } else {
            entry.alert = Some(Alert::success(format!("Successfully updated {}.", name)));
        }
        entry.update_cells();
        entry.save_enabled = false;
        self.registry.set_snapshot(&name, options);
    }
}
