//! Pending-spawner, stop and progress notifications.
//!
//! Stream updates race with request results for the same row; whichever
//! arrives last wins.

use hub_client::ProgressEvent;
use tracing::debug;

use crate::action::{Action, Effect};
use crate::app::App;
use crate::app::progress::ProgressOutcome;

impl App {
    pub(super) fn handle_stream_action(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::PendingSpawners(names) => self.pending_spawners(names),
            Action::StopNotification { name, event } => {
                if let Some(entry) = self.servers.get_mut(&name) {
                    if let Some(message) = event.as_ref().and_then(ProgressEvent::display_message)
                    {
                        entry.progress.push_log(message);
                    }
                    entry.spawn_pending = false;
                    entry.url = None;
                    entry.row.set_row_state(false);
                }
                Vec::new()
            }
            Action::ProgressStreamConnected(name) => {
                // The hub replays the full history on every connection.
                if let Some(entry) = self.servers.get_mut(&name) {
                    entry.progress.log.clear();
                }
                Vec::new()
            }
            Action::ProgressUpdate { name, event } => {
                self.progress_update(&name, &event);
                Vec::new()
            }
            Action::ProgressStreamClosed(name) => {
                debug!(server = %name, "progress listener ended");
                self.registry.subscription_closed(&name);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Subscribe to every newly pending server; unknown names trigger a reload.
    fn pending_spawners(&mut self, names: Vec<String>) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut unknown = false;

        for name in names {
            let Some(entry) = self.servers.get_mut(&name) else {
                unknown = true;
                continue;
            };
            if self.registry.is_subscribed(&name) {
                continue;
            }
            entry.progress.reset();
            entry.spawn_pending = true;
            entry.row.set_row_state(true);
            if let Some(token) = self.registry.subscribe(&name) {
                effects.push(Effect::SubscribeProgress { name, token });
            }
        }

        if unknown && !self.loading {
            self.loading = true;
            effects.push(Effect::LoadServers);
        }
        effects
    }

    fn progress_update(&mut self, name: &str, event: &ProgressEvent) {
        let Some(entry) = self.servers.get_mut(name) else {
            debug!(server = %name, "progress for unknown server ignored");
            return;
        };
        match entry.progress.apply(event) {
            ProgressOutcome::Ready => {
                if !entry.row.is_running() {
                    entry.row.set_row_state(true);
                }
                entry.row.mark_ready();
                entry.spawn_pending = false;
                if let Some(url) = &event.url {
                    entry.url = Some(url.clone());
                }
            }
            ProgressOutcome::Failed => {
                entry.spawn_pending = false;
                entry.row.set_row_state(false);
            }
            ProgressOutcome::InProgress => {}
        }
    }
}
