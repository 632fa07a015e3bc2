//! Terminal state management and cleanup.
//!
//! Responsibilities:
//! - Ensure terminal state is restored on application exit, even during panics.
//! - Manage raw mode and alternate screen cleanup via Drop trait.
//! - Release mouse capture only when it was enabled.
//!
//! Does NOT handle:
//! - Initial terminal setup (see [`enter`]).
//!
//! Invariants / Assumptions:
//! - Must be created after terminal setup is complete.
//! - Must live for the duration of the TUI session.
//! - Drop implementation must not panic.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// Put the terminal in raw mode on the alternate screen.
///
/// Returns the terminal and the guard that undoes the setup.
pub fn enter(no_mouse: bool) -> io::Result<(Terminal<CrosstermBackend<Stdout>>, TerminalGuard)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if no_mouse {
        execute!(stdout, EnterAlternateScreen)?;
    } else {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let guard = TerminalGuard::new(no_mouse);
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}

/// Guard that ensures terminal state is restored on drop.
///
/// This struct captures the terminal state configuration and restores
/// it when dropped, ensuring cleanup happens even during panics.
///
/// # Invariants
/// - Must be created after terminal setup is complete
/// - Must live for the duration of the TUI session
/// - Drop implementation must not panic
pub struct TerminalGuard {
    no_mouse: bool,
}

impl TerminalGuard {
    /// Create a new terminal guard.
    ///
    /// # Arguments
    /// * `no_mouse` - Whether mouse capture was disabled during setup
    pub fn new(no_mouse: bool) -> Self {
        Self { no_mouse }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Errors are ignored; drop must not panic.
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        if self.no_mouse {
            let _ = execute!(stdout, LeaveAlternateScreen);
        } else {
            let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        }
    }
}
