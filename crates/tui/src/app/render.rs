//! Rendering logic for the TUI app.
//!
//! Responsibilities:
//! - Render the main app layout (header, content, footer)
//! - Dispatch to screen-specific renderers
//! - Layer toasts, the new-server dialog and help on top
//!
//! Non-responsibilities:
//! - Does NOT handle input
//! - Does NOT mutate app state (except for TableState selection and the
//!   last known terminal area)

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::app::state::{CurrentScreen, FOOTER_HEIGHT, Focus, HEADER_HEIGHT};
use crate::ui::popup::render_help;
use crate::ui::screens::{logging, servers};
use crate::ui::theme::{ThemeExt, spinner_char};
use crate::ui::toast::render_toasts;

impl App {
    /// Render the application UI.
    pub fn render(&mut self, f: &mut Frame) {
        self.last_area = f.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_content(f, chunks[1]);
        self.render_footer(f, chunks[2]);

        if let Some(dialog) = &self.new_server {
            servers::render_new_server_dialog(
                f,
                dialog,
                self.edit.as_ref(),
                self.spinner_frame,
                &self.theme,
            );
        }

        render_toasts(f, &self.toasts, &self.theme);

        if self.show_help {
            render_help(f, &self.theme);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut title = vec![
            Span::styled("Hub servers", theme.title()),
            Span::raw(" - "),
            Span::styled(self.current_screen.title(), theme.info()),
        ];
        if self.is_busy() {
            title.push(Span::raw(" "));
            title.push(Span::styled(
                spinner_char(self.spinner_frame).to_string(),
                theme.warning(),
            ));
        }

        let mut context = format!("{} @ {}", self.user, self.base_url);
        if let Some(vo) = &self.session.vo {
            context.push_str(&format!(" | vo: {}", vo));
        }

        let header = Paragraph::new(vec![
            Line::from(title),
            Line::styled(context, theme.text_dim()),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border()),
        );
        f.render_widget(header, area);
    }

    fn render_content(&mut self, f: &mut Frame, area: Rect) {
        match self.current_screen {
            CurrentScreen::Servers => servers::render_servers(
                f,
                area,
                servers::ServersRenderConfig {
                    servers: &self.servers,
                    state: &mut self.servers_state,
                    panel_focused: self.focus == Focus::Panel,
                    loading: self.loading,
                    edit: self.edit.as_ref(),
                    spinner_frame: self.spinner_frame,
                    theme: &self.theme,
                },
            ),
            CurrentScreen::Logging => {
                logging::render_logging(f, area, &self.logging, self.spinner_frame, &self.theme)
            }
        }
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let hints = self.footer_hints();
        let footer = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(hints, theme.text()),
            Span::raw(" | "),
            Span::styled("?:Help", theme.info()),
            Span::raw(" | "),
            Span::styled("q:Quit", theme.error().add_modifier(Modifier::BOLD)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border()),
        );
        f.render_widget(footer, area);
    }

    /// Key hints for the part of the screen that has focus.
    fn footer_hints(&self) -> &'static str {
        if self.edit.is_some() {
            return "Enter:Apply  Esc:Cancel  Backspace:Delete";
        }
        if self.new_server.is_some() {
            return "s:Start  e:Name  h/l:Tab  j/k:Field  Enter:Edit  Esc:Close";
        }
        match (self.current_screen, self.focus) {
            (CurrentScreen::Servers, Focus::Table) => {
                "j/k:Move  Enter:Expand  s:Start  x:Stop  d:Delete  o:Open  n:New  L:Logging"
            }
            (CurrentScreen::Servers, Focus::Panel) => {
                "h/l:Tab  j/k:Field  Enter:Edit  w:Save  u:Revert  s:Start  Esc:Back"
            }
            (CurrentScreen::Logging, _) => {
                "j/k:Select  c:Create  u:Update  d:Delete  l:Level  r:Reload  L:Servers"
            }
        }
    }
}
