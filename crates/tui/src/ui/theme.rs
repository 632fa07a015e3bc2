//! Color palette and style builders.
//!
//! `Theme` is the runtime palette; `ThemeExt` builds ratatui `Style`s from it
//! so screens never hard-code colors.

use ratatui::style::{Color, Modifier, Style};

use crate::app::progress::ProgressPhase;

/// Spinner characters for animated loading indicator.
pub const SPINNER_CHARS: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];

/// Get the spinner character for a given animation frame.
pub fn spinner_char(frame: u8) -> char {
    SPINNER_CHARS[frame as usize % SPINNER_CHARS.len()]
}

/// Runtime color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub title: Color,
    pub accent: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub disabled: Color,
    pub table_header_fg: Color,
    pub table_header_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Black,
            text: Color::White,
            text_dim: Color::Gray,
            border: Color::Cyan,
            title: Color::Cyan,
            accent: Color::Yellow,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            disabled: Color::DarkGray,
            table_header_fg: Color::Cyan,
            table_header_bg: Color::Reset,
        }
    }
}

/// Trait extending Theme with helper methods for creating styled widgets.
pub trait ThemeExt {
    fn text(&self) -> Style;
    fn text_dim(&self) -> Style;
    /// Title style (accent + bold).
    fn title(&self) -> Style;
    fn border(&self) -> Style;
    fn border_focused(&self) -> Style;
    /// Highlight/selection style.
    fn highlight(&self) -> Style;
    fn success(&self) -> Style;
    fn warning(&self) -> Style;
    fn error(&self) -> Style;
    fn info(&self) -> Style;
    fn disabled(&self) -> Style;
    fn table_header(&self) -> Style;
    /// Gauge color for a progress phase: neutral, success or failure.
    fn progress(&self, phase: ProgressPhase) -> Style;
}

impl ThemeExt for Theme {
    fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    fn text_dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    fn highlight(&self) -> Style {
        Style::default().fg(self.highlight_fg).bg(self.highlight_bg)
    }

    fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    fn info(&self) -> Style {
        Style::default().fg(self.info)
    }

    fn disabled(&self) -> Style {
        Style::default().fg(self.disabled)
    }

    fn table_header(&self) -> Style {
        Style::default()
            .fg(self.table_header_fg)
            .bg(self.table_header_bg)
            .add_modifier(Modifier::BOLD)
    }

    fn progress(&self, phase: ProgressPhase) -> Style {
        match phase {
            ProgressPhase::Succeeded => Style::default().fg(self.success),
            ProgressPhase::Failed => Style::default().fg(self.error),
            ProgressPhase::Idle | ProgressPhase::Pending => Style::default().fg(self.info),
        }
    }
}
