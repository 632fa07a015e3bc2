//! Keyboard input handling.
//!
//! Responsibilities:
//! - Translate key presses into Actions for the focused part of the screen
//! - Drive in-place text editing of form fields and the server name
//!
//! Non-responsibilities:
//! - Does NOT mutate view-model state beyond focus and edit buffers
//!   (the returned Action does that through `App::update`)
//!
//! Key map (servers screen, table focus):
//! `j`/`k` move, `Enter` expand, `Tab` into panel, `s` start, `x` stop or
//! cancel, `d` delete, `o` open, `p` progress log, `n` new server,
//! `r` reload, `L` logging screen, `?` help, `q` quit.
//!
//! Panel and dialog: `h`/`l` tab, `j`/`k` field, `Left`/`Right` cycle a
//! choice, `Enter` edit or cycle, `w` save, `u` revert, `Esc` back.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::app::App;
use crate::app::form::{FormTab, ServerForm, fields_on};
use crate::app::state::{CurrentScreen, EditTarget, FieldEdit, Focus};

/// Check if a key event represents a printable character for text input.
fn is_printable_char(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(c) if !c.is_control())
        && (key.modifiers - KeyModifiers::SHIFT).is_empty()
}

/// Next (or previous) visible field on `tab` after `current`.
fn step_field(
    form: &ServerForm,
    tab: FormTab,
    current: Option<&'static str>,
    forward: bool,
) -> Option<&'static str> {
    let visible: Vec<&'static str> = fields_on(tab)
        .filter(|d| !form.is_hidden(d.param))
        .map(|d| d.param)
        .collect();
    if visible.is_empty() {
        return None;
    }
    let position = current.and_then(|c| visible.iter().position(|p| *p == c));
    let index = match (position, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % visible.len(),
        (Some(i), false) => (i + visible.len() - 1) % visible.len(),
    };
    Some(visible[index])
}

/// Choice after (or before) the current value of a select field.
fn step_choice(form: &ServerForm, param: &str, forward: bool) -> Option<String> {
    let field = form.field(param)?;
    if field.choices.is_empty() {
        return None;
    }
    let len = field.choices.len();
    let position = field
        .value
        .as_deref()
        .and_then(|v| field.choices.iter().position(|c| c == v));
    let index = match (position, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    };
    Some(field.choices[index].clone())
}

impl App {
    /// Handle a key press; returns the Action to dispatch, if any.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        if self.edit.is_some() {
            return self.handle_edit_input(key);
        }
        if self.show_help {
            self.show_help = false;
            return None;
        }
        if self.new_server.is_some() {
            return self.handle_dialog_input(key);
        }

        match self.current_screen {
            CurrentScreen::Servers => match self.focus {
                Focus::Table => self.handle_table_input(key),
                Focus::Panel => self.handle_panel_input(key),
            },
            CurrentScreen::Logging => self.handle_logging_input(key),
        }
    }

    fn handle_edit_input(&mut self, key: KeyEvent) -> Option<Action> {
        let edit = self.edit.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.edit = None;
                None
            }
            KeyCode::Enter => {
                let edit = self.edit.take()?;
                match edit.target {
                    EditTarget::Field { name, param } => Some(Action::EditField {
                        name,
                        param,
                        value: Some(edit.buffer),
                    }),
                    EditTarget::NewServerName => Some(Action::SetNewServerName(edit.buffer)),
                }
            }
            KeyCode::Backspace => {
                edit.buffer.pop();
                None
            }
            KeyCode::Char(c) if is_printable_char(key) => {
                edit.buffer.push(c);
                None
            }
            _ => None,
        }
    }

    fn handle_table_input(&mut self, key: KeyEvent) -> Option<Action> {
        if let Some(action) = self.handle_global_input(key) {
            return Some(action);
        }
        let name = self.selected_server_name();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextServer),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PreviousServer),
            KeyCode::Char('n') => Some(Action::OpenNewServerDialog),
            KeyCode::Char('r') => Some(Action::LoadServers),
            KeyCode::Enter => name.map(Action::ToggleRow),
            KeyCode::Tab => {
                if self.selected_server().is_some_and(|s| s.expanded) {
                    self.focus = Focus::Panel;
                }
                None
            }
            KeyCode::Char('s') => name.map(Action::StartServer),
            KeyCode::Char('x') => {
                let pending = self.selected_server().is_some_and(|s| s.spawn_pending);
                name.map(|n| {
                    if pending {
                        Action::CancelServer(n)
                    } else {
                        Action::StopServer(n)
                    }
                })
            }
            KeyCode::Char('d') => name.map(Action::DeleteServer),
            KeyCode::Char('o') => name.map(Action::OpenServer),
            KeyCode::Char('p') => name.map(Action::ShowProgressLog),
            _ => None,
        }
    }

    fn handle_panel_input(&mut self, key: KeyEvent) -> Option<Action> {
        let name = self.selected_server_name()?;
        match key.code {
            KeyCode::Esc | KeyCode::Tab => {
                self.focus = Focus::Table;
                None
            }
            KeyCode::Char('w') => Some(Action::SaveChanges(name)),
            KeyCode::Char('u') => Some(Action::RevertChanges(name)),
            KeyCode::Char('s') => Some(Action::StartServer(name)),
            _ => {
                let entry = self.servers.get(&name)?;
                let (form, tab, focused) = (&entry.form, entry.active_tab, entry.focused_field);
                self.form_key(key, Some(name.clone()), form.clone(), tab, focused)
            }
        }
    }

    fn handle_dialog_input(&mut self, key: KeyEvent) -> Option<Action> {
        let dialog = self.new_server.as_ref()?;
        match key.code {
            KeyCode::Esc => Some(Action::CloseNewServerDialog),
            KeyCode::Char('s') => Some(Action::StartNewServer),
            KeyCode::Char('e') => {
                self.edit = Some(FieldEdit::new(EditTarget::NewServerName, &dialog.name_input));
                None
            }
            _ => {
                let (form, tab, focused) =
                    (dialog.form.clone(), dialog.active_tab, dialog.focused_field);
                self.form_key(key, None, form, tab, focused)
            }
        }
    }

    /// Keys shared by a server panel and the new-server dialog.
    fn form_key(
        &mut self,
        key: KeyEvent,
        name: Option<String>,
        form: ServerForm,
        tab: FormTab,
        focused: Option<&'static str>,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Char('l') => Some(Action::ClickTab {
                name,
                tab: tab.next(),
            }),
            KeyCode::Char('h') => Some(Action::ClickTab {
                name,
                tab: tab.previous(),
            }),
            KeyCode::Char('j') | KeyCode::Down => {
                step_field(&form, tab, focused, true)
                    .map(|param| Action::FocusField { name, param })
            }
            KeyCode::Char('k') | KeyCode::Up => step_field(&form, tab, focused, false)
                .map(|param| Action::FocusField { name, param }),
            KeyCode::Left | KeyCode::Right => {
                let param = focused?;
                let value = step_choice(&form, param, key.code == KeyCode::Right)?;
                Some(Action::EditField {
                    name,
                    param,
                    value: Some(value),
                })
            }
            KeyCode::Enter => {
                let param = focused?;
                if let Some(value) = step_choice(&form, param, true) {
                    return Some(Action::EditField {
                        name,
                        param,
                        value: Some(value),
                    });
                }
                let current = form.value(param).unwrap_or_default().to_string();
                self.edit = Some(FieldEdit::new(EditTarget::Field { name, param }, &current));
                None
            }
            _ => None,
        }
    }

    fn handle_logging_input(&mut self, key: KeyEvent) -> Option<Action> {
        if let Some(action) = self.handle_global_input(key) {
            return Some(action);
        }
        let kind = self.logging.selected_kind();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextLogHandler),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PreviousLogHandler),
            KeyCode::Char('r') => Some(Action::LoadLogHandlers),
            KeyCode::Char('c') => Some(Action::CreateLogHandler(kind)),
            KeyCode::Char('u') => Some(Action::UpdateLogHandler(kind)),
            KeyCode::Char('d') => Some(Action::DeleteLogHandler(kind)),
            KeyCode::Char('l') | KeyCode::Enter => Some(Action::CycleLogLevel(kind)),
            _ => None,
        }
    }

    /// Keys that behave the same on every screen outside of forms.
    fn handle_global_input(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => {
                self.show_help = true;
                None
            }
            KeyCode::Char('L') => Some(Action::SwitchScreen(self.current_screen.next())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_step_field_skips_hidden_fields() {
        let mut form = ServerForm::new();
        form.set_hidden("gpus", true);
        assert_eq!(step_field(&form, FormTab::Resources, None, true), Some("nodes"));
        assert_eq!(
            step_field(&form, FormTab::Resources, Some("nodes"), true),
            Some("runtime")
        );
        assert_eq!(
            step_field(&form, FormTab::Resources, Some("nodes"), false),
            Some("runtime")
        );
    }

    #[test]
    fn test_step_choice_wraps() {
        let mut form = ServerForm::new();
        form.set_choices("system", vec!["sys-a".to_string(), "sys-b".to_string()]);
        form.set_value("system", Some("sys-b".to_string()));
        assert_eq!(step_choice(&form, "system", true).as_deref(), Some("sys-a"));
        assert_eq!(step_choice(&form, "project", true), None);
    }

    #[test]
    fn test_text_edit_commits_on_enter() {
        let mut app = App::default();
        app.edit = Some(FieldEdit::new(
            EditTarget::Field {
                name: Some("lab1".to_string()),
                param: "nodes",
            },
            "",
        ));
        assert!(app.handle_input(key(KeyCode::Char('4'))).is_none());
        let action = app.handle_input(key(KeyCode::Enter));
        assert!(matches!(
            action,
            Some(Action::EditField { param: "nodes", value: Some(ref v), .. }) if v == "4"
        ));
        assert!(app.edit.is_none());
    }

    #[test]
    fn test_quit_from_table() {
        let mut app = App::default();
        assert!(matches!(app.handle_input(key(KeyCode::Char('q'))), Some(Action::Quit)));
    }
}
