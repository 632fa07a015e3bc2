//! Mouse event handling for the TUI app.
//!
//! Responsibilities:
//! - Handle mouse scroll events
//! - Handle clicks on server table rows
//!
//! Does NOT handle:
//! - Does NOT handle keyboard input
//! - Does NOT render the UI

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::action::Action;
use crate::app::App;
use crate::app::state::{CurrentScreen, FOOTER_HEIGHT, Focus, HEADER_HEIGHT};

/// Rows between the top of the content area and the first table row
/// (block border plus column header).
const TABLE_HEADER_OFFSET: u16 = 2;

impl App {
    /// Handle mouse input - returns Action if one should be dispatched.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        if self.new_server.is_some() || self.edit.is_some() {
            return None;
        }
        match (self.current_screen, mouse.kind) {
            (CurrentScreen::Servers, MouseEventKind::ScrollUp) => Some(Action::PreviousServer),
            (CurrentScreen::Servers, MouseEventKind::ScrollDown) => Some(Action::NextServer),
            (CurrentScreen::Logging, MouseEventKind::ScrollUp) => Some(Action::PreviousLogHandler),
            (CurrentScreen::Logging, MouseEventKind::ScrollDown) => Some(Action::NextLogHandler),
            (CurrentScreen::Servers, MouseEventKind::Down(MouseButton::Left)) => {
                self.handle_table_click(mouse.row)
            }
            _ => None,
        }
    }

    /// Select the clicked row; clicking the selected row toggles its panel.
    fn handle_table_click(&mut self, row: u16) -> Option<Action> {
        let first_row = HEADER_HEIGHT + TABLE_HEADER_OFFSET;
        let content_end = self.last_area.height.saturating_sub(FOOTER_HEIGHT);
        if row < first_row || row >= content_end {
            return None;
        }
        let index = usize::from(row - first_row) + self.servers_state.offset();
        let name = self.servers.keys().nth(index)?.clone();

        if self.servers_state.selected() == Some(index) {
            return Some(Action::ToggleRow(name));
        }
        self.servers_state.select(Some(index));
        self.focus = Focus::Table;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::servers::ServerEntry;
    use crossterm::event::KeyModifiers;
    use hub_client::ServerModel;
    use ratatui::layout::Rect;

    fn click(row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app_with(names: &[&str]) -> App {
        let mut app = App::default();
        app.last_area = Rect::new(0, 0, 100, 40);
        for name in names {
            let model = ServerModel {
                name: name.to_string(),
                ..ServerModel::default()
            };
            app.servers.insert(
                name.to_string(),
                ServerEntry::from_model(&model, &app.session),
            );
        }
        app
    }

    #[test]
    fn test_click_selects_then_toggles() {
        let mut app = app_with(&["lab1", "lab2"]);
        let second = HEADER_HEIGHT + TABLE_HEADER_OFFSET + 1;
        assert!(app.handle_mouse(click(second)).is_none());
        assert_eq!(app.servers_state.selected(), Some(1));
        assert!(matches!(
            app.handle_mouse(click(second)),
            Some(Action::ToggleRow(ref n)) if n == "lab2"
        ));
    }

    #[test]
    fn test_click_below_rows_is_ignored() {
        let mut app = app_with(&["lab1"]);
        assert!(app.handle_mouse(click(HEADER_HEIGHT + 10)).is_none());
        assert!(app.handle_mouse(click(0)).is_none());
    }
}
