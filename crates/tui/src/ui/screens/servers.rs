//! Servers screen rendering.
//!
//! Renders the named-server table, the configuration panel of the selected
//! row (tabs with warning badges, fields, row controls, progress bar and
//! log), and the new-server dialog.

use std::collections::BTreeMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Tabs, Wrap},
};

use crate::app::form::{FormTab, ServerForm, fields_on};
use crate::app::progress::ProgressView;
use crate::app::row::{RowControl, RowControls};
use crate::app::servers::{NewServerDialog, ServerEntry};
use crate::app::state::{Alert, EditTarget, FieldEdit};
use crate::app::warnings::{WarningState, tab_disabled};
use crate::ui::popup::centered_rect;
use crate::ui::theme::{Theme, ThemeExt, spinner_char};

/// Height of the configuration panel below the table.
const PANEL_HEIGHT: u16 = 18;
/// Log lines kept visible in the panel.
const LOG_LINES: usize = 6;

/// Configuration for rendering the servers screen.
pub struct ServersRenderConfig<'a> {
    pub servers: &'a BTreeMap<String, ServerEntry>,
    pub state: &'a mut TableState,
    /// The configuration panel has keyboard focus.
    pub panel_focused: bool,
    pub loading: bool,
    pub edit: Option<&'a FieldEdit>,
    pub spinner_frame: u8,
    pub theme: &'a Theme,
}

/// Render the server table and, when the selected row is expanded, its panel.
pub fn render_servers(f: &mut Frame, area: Rect, config: ServersRenderConfig) {
    let ServersRenderConfig {
        servers,
        state,
        panel_focused,
        loading,
        edit,
        spinner_frame,
        theme,
    } = config;

    let selected = state
        .selected()
        .and_then(|i| servers.values().nth(i))
        .filter(|entry| entry.expanded);

    let (table_area, panel_area) = match selected {
        Some(_) if area.height > PANEL_HEIGHT + 4 => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(4), Constraint::Length(PANEL_HEIGHT)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        }
        _ => (area, None),
    };

    render_table(f, table_area, servers, state, loading, spinner_frame, panel_focused, theme);

    if let (Some(entry), Some(panel_area)) = (selected, panel_area) {
        let edit = edit.filter(|e| {
            matches!(&e.target, EditTarget::Field { name: Some(n), .. } if *n == entry.name)
        });
        render_panel(f, panel_area, entry, panel_focused, edit, theme);
    }
}

#[allow(clippy::too_many_arguments)]
fn render_table(
    f: &mut Frame,
    area: Rect,
    servers: &BTreeMap<String, ServerEntry>,
    state: &mut TableState,
    loading: bool,
    spinner_frame: u8,
    panel_focused: bool,
    theme: &Theme,
) {
    let title = if loading {
        format!(" Servers {} ", spinner_char(spinner_frame))
    } else {
        format!(" Servers ({}) ", servers.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if panel_focused {
            theme.border()
        } else {
            theme.border_focused()
        });

    if servers.is_empty() {
        let text = if loading {
            "Loading servers..."
        } else {
            "No named servers. Press 'n' to create one."
        };
        let p = Paragraph::new(text)
            .block(block)
            .style(theme.text_dim())
            .alignment(Alignment::Center);
        f.render_widget(p, area);
        return;
    }

    let header = Row::new(
        ["Name", "Status", "System", "Partition", "Project", "Last activity", "Controls"]
            .into_iter()
            .map(|h| Cell::from(h).style(theme.table_header())),
    );

    let rows: Vec<Row> = servers
        .values()
        .map(|entry| {
            let status_style = match entry.status() {
                "running" => theme.success(),
                "starting" | "working" => theme.warning(),
                "n/a" => theme.disabled(),
                _ => theme.text_dim(),
            };
            let marker = if entry.expanded { "▾ " } else { "▸ " };
            let activity = entry
                .last_activity
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            Row::new(vec![
                Cell::from(format!("{}{}", marker, entry.name)),
                Cell::from(entry.status()).style(status_style),
                Cell::from(entry.cells.system.clone()),
                Cell::from(entry.cells.partition.clone()),
                Cell::from(entry.cells.project.clone()),
                Cell::from(activity),
                Cell::from(controls_line(&entry.row, theme)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(18),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(theme.highlight())
    .highlight_symbol("> ");

    f.render_stateful_widget(table, area, state);
}

/// Visible row controls; disabled ones are dimmed.
fn controls_line(row: &RowControls, theme: &Theme) -> Line<'static> {
    let spans: Vec<Span> = row
        .visible_controls()
        .flat_map(|control| {
            let style = if !row.is_enabled(control) {
                theme.disabled()
            } else if control == RowControl::Na {
                theme.warning()
            } else {
                theme.info()
            };
            [Span::styled(format!("[{}]", control.label()), style), Span::raw(" ")]
        })
        .collect();
    Line::from(spans)
}

fn render_panel(
    f: &mut Frame,
    area: Rect,
    entry: &ServerEntry,
    focused: bool,
    edit: Option<&FieldEdit>,
    theme: &Theme,
) {
    let mut title = format!(" {} ", entry.name);
    if entry.save_enabled {
        title.push_str("[modified] ");
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if focused {
            theme.border_focused()
        } else {
            theme.border()
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    let log_height = if entry.show_log { LOG_LINES as u16 + 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(log_height),
        ])
        .split(inner);

    render_tabs(f, chunks[0], &entry.form, &entry.warnings, entry.active_tab, theme);
    render_fields(
        f,
        chunks[1],
        FormView {
            form: &entry.form,
            warnings: &entry.warnings,
            tab: entry.active_tab,
            focused_field: entry.focused_field.filter(|_| focused),
            edit,
        },
        theme,
    );
    render_alert(f, chunks[2], entry.alert.as_ref(), theme);
    render_progress(f, chunks[3], &entry.progress, theme);
    if entry.show_log {
        render_log(f, chunks[4], &entry.progress, theme);
    }
}

fn render_tabs(
    f: &mut Frame,
    area: Rect,
    form: &ServerForm,
    warnings: &WarningState,
    active: FormTab,
    theme: &Theme,
) {
    let titles: Vec<Line> = FormTab::ALL
        .iter()
        .map(|tab| {
            let style = if tab_disabled(*tab, form) {
                theme.disabled()
            } else {
                theme.text()
            };
            let mut spans = vec![Span::styled(tab.title(), style)];
            if warnings.tab_warning(*tab, form) {
                spans.push(Span::styled(" !", theme.warning()));
            }
            Line::from(spans)
        })
        .collect();
    let selected = FormTab::ALL.iter().position(|t| *t == active).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(theme.title().add_modifier(Modifier::UNDERLINED))
        .divider("|");
    f.render_widget(tabs, area);
}

struct FormView<'a> {
    form: &'a ServerForm,
    warnings: &'a WarningState,
    tab: FormTab,
    focused_field: Option<&'static str>,
    edit: Option<&'a FieldEdit>,
}

fn render_fields(f: &mut Frame, area: Rect, view: FormView, theme: &Theme) {
    let FormView {
        form,
        warnings,
        tab,
        focused_field,
        edit,
    } = view;

    let mut lines: Vec<Line> = Vec::new();
    for desc in fields_on(tab) {
        let Some(field) = form.field(desc.param) else {
            continue;
        };
        if field.hidden {
            continue;
        }
        let focused = focused_field == Some(desc.param);
        let editing = edit.filter(|e| {
            matches!(e.target, EditTarget::Field { param, .. } if param == desc.param)
        });

        let value = match (editing, field.value.as_deref()) {
            (Some(edit), _) => format!("{}▏", edit.buffer),
            (None, Some(v)) if !field.choices.is_empty() => format!("< {} >", v),
            (None, Some(v)) if !v.is_empty() => v.to_string(),
            (None, _) => "-".to_string(),
        };
        let label_style = if focused { theme.highlight() } else { theme.text() };
        let mut spans = vec![
            Span::styled(if focused { "> " } else { "  " }, label_style),
            Span::styled(format!("{:<12}", desc.param), label_style),
            Span::styled(value, theme.info()),
        ];
        if field.required {
            spans.push(Span::styled(" *", theme.text_dim()));
        }
        if warnings.has_warning(desc.param) {
            spans.push(Span::styled("  ! check this value", theme.warning()));
        }
        lines.push(Line::from(spans));
    }

    if lines.is_empty() {
        lines.push(Line::styled("  Nothing to configure on this tab.", theme.text_dim()));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_alert(f: &mut Frame, area: Rect, alert: Option<&Alert>, theme: &Theme) {
    let Some(alert) = alert else {
        return;
    };
    let p = Paragraph::new(alert.message.as_str())
        .style(Style::default().fg(alert.level.color(theme)))
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn render_progress(f: &mut Frame, area: Rect, progress: &ProgressView, theme: &Theme) {
    let label = progress
        .log
        .last()
        .cloned()
        .unwrap_or_else(|| format!("{}%", progress.percent));
    let gauge = Gauge::default()
        .gauge_style(theme.progress(progress.phase))
        .percent(progress.percent.min(100))
        .label(label);
    f.render_widget(gauge, area);
}

fn render_log(f: &mut Frame, area: Rect, progress: &ProgressView, theme: &Theme) {
    let skip = progress.log.len().saturating_sub(LOG_LINES);
    let mut lines = vec![Line::styled("Progress log:", theme.text_dim())];
    lines.extend(
        progress
            .log
            .iter()
            .skip(skip)
            .map(|m| Line::styled(format!("  {}", m), theme.text())),
    );
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

/// Render the "new server" dialog on top of the screen.
pub fn render_new_server_dialog(
    f: &mut Frame,
    dialog: &NewServerDialog,
    edit: Option<&FieldEdit>,
    spinner_frame: u8,
    theme: &Theme,
) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New server (s: start, e: name, Esc: close) ")
        .border_style(theme.border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let name = match edit.filter(|e| e.target == EditTarget::NewServerName) {
        Some(edit) => format!("{}▏", edit.buffer),
        None if dialog.name_input.is_empty() => "(next free default name)".to_string(),
        None => dialog.name_input.clone(),
    };
    let mut name_line = vec![
        Span::styled("Name: ", theme.text()),
        Span::styled(name, theme.info()),
    ];
    if dialog.busy {
        name_line.push(Span::styled(
            format!("  {} starting...", spinner_char(spinner_frame)),
            theme.warning(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(name_line)), chunks[0]);

    render_tabs(f, chunks[1], &dialog.form, &dialog.warnings, dialog.active_tab, theme);
    let field_edit = edit.filter(|e| matches!(e.target, EditTarget::Field { name: None, .. }));
    render_fields(
        f,
        chunks[2],
        FormView {
            form: &dialog.form,
            warnings: &dialog.warnings,
            tab: dialog.active_tab,
            focused_field: dialog.focused_field,
            edit: field_edit,
        },
        theme,
    );
    render_alert(f, chunks[3], dialog.alert.as_ref(), theme);
}
