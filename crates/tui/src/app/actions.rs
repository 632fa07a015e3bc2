//! Action handling for the TUI app.
//!
//! Responsibilities:
//! - Process Actions and mutate App state accordingly
//! - Return the side effects the runtime must execute
//!
//! Non-responsibilities:
//! - Does NOT create Actions from key presses (handled by input.rs)
//! - Does NOT perform async operations
//!
//! This module delegates to domain-specific submodules:
//! - `servers`: user intents on server rows, panels and the new-server dialog
//! - `results`: responses to server requests
//! - `streams`: pending-spawner, stop and progress notifications
//! - `logging`: logging handler screen
//! - `system`: ticks, notifications, navigation

use tracing::debug;

use crate::action::{Action, Effect, RedactedAction};
use crate::app::App;

mod logging;
mod results;
mod servers;
mod streams;
mod system;

impl App {
    /// State mutation based on Action.
    ///
    /// Returns the effects to run; the caller executes them and feeds their
    /// results back as further actions.
    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        debug!(action = ?RedactedAction(&action), "update");
        match action {
            // Server intents
            Action::LoadServers
            | Action::StartServer(_)
            | Action::StartNewServer
            | Action::OpenNewServerDialog
            | Action::CloseNewServerDialog
            | Action::StopServer(_)
            | Action::CancelServer(_)
            | Action::DeleteServer(_)
            | Action::SaveChanges(_)
            | Action::RevertChanges(_)
            | Action::OpenServer(_)
            | Action::ShowProgressLog(_)
            | Action::ToggleRow(_)
            | Action::EditField { .. }
            | Action::FocusField { .. }
            | Action::ClickTab { .. }
            | Action::SetNewServerName(_) => self.handle_server_intent(action),

            // Server results
            Action::ServersLoaded(_)
            | Action::StartFinished { .. }
            | Action::ServerOperationFinished { .. }
            | Action::UpdateFinished { .. } => self.handle_server_result(action),

            // Streams
            Action::PendingSpawners(_)
            | Action::StopNotification { .. }
            | Action::ProgressStreamConnected(_)
            | Action::ProgressUpdate { .. }
            | Action::ProgressStreamClosed(_) => self.handle_stream_action(action),

            // Logging handlers
            Action::LoadLogHandlers
            | Action::LogHandlersLoaded(_)
            | Action::NextLogHandler
            | Action::PreviousLogHandler
            | Action::CycleLogLevel(_)
            | Action::CreateLogHandler(_)
            | Action::UpdateLogHandler(_)
            | Action::DeleteLogHandler(_)
            | Action::LogHandlerOperationFinished { .. } => self.handle_logging_action(action),

            // Input is translated by the main loop before it reaches update.
            Action::Input(_) | Action::Mouse(_) => Vec::new(),

            Action::Quit
            | Action::Resize(_, _)
            | Action::Tick
            | Action::Notify(_, _)
            | Action::SwitchScreen(_)
            | Action::NextServer
            | Action::PreviousServer => self.handle_system_action(action),
        }
    }
}
