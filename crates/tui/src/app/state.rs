//! Application state types and enums.
//!
//! Responsibilities:
//! - Define screen navigation enum (CurrentScreen)
//! - Define keyboard focus (Focus) and in-progress text edits (FieldEdit)
//! - Define inline alerts shown inside a server panel or dialog (Alert)
//!
//! Does NOT handle:
//! - Does NOT handle state mutations (in App impl)
//! - Does NOT define the main App struct

use crate::ui::ToastLevel;

/// Layout constants for UI components.
pub const HEADER_HEIGHT: u16 = 4;
pub const FOOTER_HEIGHT: u16 = 3;

/// Current active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrentScreen {
    #[default]
    Servers,
    Logging,
}

impl CurrentScreen {
    /// Returns the next screen in cyclic navigation order.
    pub fn next(self) -> Self {
        match self {
            Self::Servers => Self::Logging,
            Self::Logging => Self::Servers,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Servers => "Servers",
            Self::Logging => "Logging",
        }
    }
}

/// Which part of the servers screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Server table: row-level controls.
    #[default]
    Table,
    /// Configuration panel of the selected server.
    Panel,
}

/// Inline message shown in a server panel or the new-server dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: ToastLevel,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

/// What a text edit writes back to when committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// A configuration field; `name` is `None` for the new-server dialog.
    Field {
        name: Option<String>,
        param: &'static str,
    },
    /// The name input of the new-server dialog.
    NewServerName,
}

/// A text input being edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub target: EditTarget,
    pub buffer: String,
}

impl FieldEdit {
    pub fn new(target: EditTarget, initial: &str) -> Self {
        Self {
            target,
            buffer: initial.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_cycle() {
        assert_eq!(CurrentScreen::Servers.next(), CurrentScreen::Logging);
        assert_eq!(CurrentScreen::Logging.next(), CurrentScreen::Servers);
    }
}
