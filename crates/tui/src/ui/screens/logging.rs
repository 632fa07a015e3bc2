//! Logging screen rendering.
//!
//! Lists the four handler kinds of the hub's logging service with their
//! current level, and shows the configuration of the selected one.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use serde_json::Value;

use hub_client::HandlerKind;

use crate::app::logging::LoggingState;
use crate::ui::theme::{Theme, ThemeExt, spinner_char};

/// Render the logging handler screen.
pub fn render_logging(
    f: &mut Frame,
    area: Rect,
    logging: &LoggingState,
    spinner_frame: u8,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(area);

    let title = if logging.loading {
        format!(" Handlers: {} {} ", logging.service, spinner_char(spinner_frame))
    } else {
        format!(" Handlers: {} ", logging.service)
    };
    let list_block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.border_focused());

    if logging.handlers.is_none() {
        let text = if logging.loading {
            "Loading handlers..."
        } else {
            "Handlers not loaded. Press 'r' to reload."
        };
        let p = Paragraph::new(text)
            .block(list_block)
            .style(theme.text_dim())
            .alignment(Alignment::Center);
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = HandlerKind::ALL
        .iter()
        .map(|kind| {
            let (status, style) = match logging.handler(*kind) {
                Some(handler) => (level_text(handler.level()), theme.success()),
                None => ("not configured".to_string(), theme.disabled()),
            };
            let mut spans = vec![
                Span::styled(format!("{:<8}", kind.as_str()), theme.text()),
                Span::styled(status, style),
            ];
            if logging.dirty.contains(kind) {
                spans.push(Span::styled(" *", theme.warning()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(logging.selected % HandlerKind::ALL.len()));
    let list = List::new(items)
        .block(list_block)
        .highlight_style(theme.highlight())
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[0], &mut state);

    render_configuration(f, chunks[1], logging, theme);
}

fn render_configuration(f: &mut Frame, area: Rect, logging: &LoggingState, theme: &Theme) {
    let kind = logging.selected_kind();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} handler ", kind))
        .border_style(theme.border());

    let lines: Vec<Line> = match logging.handler(kind) {
        Some(handler) => {
            let mut lines: Vec<Line> = handler
                .configuration
                .iter()
                .map(|(key, value)| {
                    Line::from(vec![
                        Span::styled(format!("{:<14}", key), theme.text()),
                        Span::styled(value_text(value), theme.info()),
                    ])
                })
                .collect();
            lines.push(Line::raw(""));
            let hint = if logging.dirty.contains(&kind) {
                "Level changed locally. Press 'u' to send, 'r' to discard."
            } else {
                "'l' cycles the level, 'd' deletes the handler."
            };
            lines.push(Line::styled(hint, theme.text_dim()));
            lines
        }
        None => vec![Line::styled(
            "No handler of this kind. Press 'c' to create it with defaults.",
            theme.text_dim(),
        )],
    };

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn level_text(level: Option<&Value>) -> String {
    level.map(value_text).unwrap_or_else(|| "-".to_string())
}

/// Strings without quotes, everything else as JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
