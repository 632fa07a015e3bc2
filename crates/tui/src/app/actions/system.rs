//! System action handlers for the TUI app.
//!
//! Responsibilities:
//! - Handle notifications and toast expiry
//! - Handle terminal resize events
//! - Handle screen switching and table navigation
//! - Cancel the session's listeners on quit

use crate::action::{Action, Effect};
use crate::app::App;
use crate::app::state::{CurrentScreen, Focus};
use crate::ui::Toast;

impl App {
    pub(super) fn handle_system_action(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Quit => {
                self.registry.shutdown();
            }
            Action::Notify(level, message) => {
                self.toasts.push(Toast::new(level, message));
            }
            Action::Tick => {
                self.toasts.retain(|t| !t.is_expired());
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
            }
            Action::Resize(width, height) => {
                self.last_area = ratatui::layout::Rect::new(0, 0, width, height);
            }
            Action::SwitchScreen(screen) => {
                self.current_screen = screen;
                self.edit = None;
                if screen == CurrentScreen::Logging
                    && self.logging.handlers.is_none()
                    && !self.logging.loading
                {
                    return self.update(Action::LoadLogHandlers);
                }
            }
            Action::NextServer => self.move_selection(1),
            Action::PreviousServer => self.move_selection(-1),
            _ => {}
        }
        Vec::new()
    }

    /// Move the table cursor with wrap-around; the panel focus follows the row.
    fn move_selection(&mut self, delta: isize) {
        let len = self.servers.len();
        if len == 0 {
            return;
        }
        let current = self.servers_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.servers_state.select(Some(next));
        if self.selected_server().is_none_or(|s| !s.expanded) {
            self.focus = Focus::Table;
        }
    }
}
