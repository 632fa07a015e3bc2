//! Toast notifications for transient feedback.
//!
//! Toasts stack in the bottom-right corner above the footer, newest at the
//! bottom. Expired toasts are pruned on the next tick; until then they are
//! simply not drawn.

use std::time::{Duration, Instant};

use hub_config::constants::DEFAULT_TOAST_TTL_SECS;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use uuid::Uuid;

use crate::app::state::FOOTER_HEIGHT;
use crate::ui::theme::Theme;

const MAX_VISIBLE: usize = 4;
const TOAST_HEIGHT: u16 = 4;
const TOAST_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn tag(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "OK",
            Self::Warning => "WARN",
            Self::Error => "ERR",
        }
    }

    /// Failures from the hub are often long; they get twice the reading time.
    pub fn ttl(self) -> Duration {
        let secs = match self {
            Self::Error => DEFAULT_TOAST_TTL_SECS * 2,
            _ => DEFAULT_TOAST_TTL_SECS,
        };
        Duration::from_secs(secs)
    }

    pub(crate) fn color(self, theme: &Theme) -> Color {
        match self {
            Self::Info => theme.info,
            Self::Success => theme.success,
            Self::Warning => theme.warning,
            Self::Error => theme.error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Instant::now(),
            ttl: level.ttl(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// The newest unexpired toasts, oldest first, capped at what fits on screen.
pub fn visible_toasts(toasts: &[Toast]) -> Vec<&Toast> {
    let active: Vec<&Toast> = toasts.iter().filter(|t| !t.is_expired()).collect();
    let skip = active.len().saturating_sub(MAX_VISIBLE);
    active.into_iter().skip(skip).collect()
}

pub fn render_toasts(f: &mut Frame, toasts: &[Toast], theme: &Theme) {
    let visible = visible_toasts(toasts);
    if visible.is_empty() {
        return;
    }

    let area = f.area();
    let stack_height = visible.len() as u16 * TOAST_HEIGHT;
    if area.height < FOOTER_HEIGHT + stack_height + 2 || area.width < TOAST_WIDTH + 2 {
        return;
    }

    let stack = Rect {
        x: area.width - TOAST_WIDTH - 2,
        y: area.height - FOOTER_HEIGHT - stack_height - 1,
        width: TOAST_WIDTH,
        height: stack_height,
    };
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(TOAST_HEIGHT); visible.len()])
        .split(stack);

    for (toast, slot) in visible.into_iter().zip(slots.iter()) {
        let color = toast.level.color(theme);
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", toast.level.tag()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(toast.message.as_str()),
        ]);
        let body = Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(Clear, *slot);
        f.render_widget(body, *slot);
    }
}
