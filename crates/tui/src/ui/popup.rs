//! Modal popup rendering for help and the new-server dialog frame.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::theme::{Theme, ThemeExt};

/// Default popup width as a percentage of the terminal.
pub const POPUP_WIDTH_PERCENT: u16 = 60;
/// Default popup height as a percentage of the terminal.
pub const POPUP_HEIGHT_PERCENT: u16 = 70;

const HELP_TEXT: &str = r#"
Servers (table):
  j/k    Move between servers
  Enter  Expand or collapse the configuration panel
  Tab    Focus the expanded panel
  s      Start          x  Stop (cancel while starting)
  d      Delete         o  Open in browser
  p      Progress log   n  New server
  r      Reload         L  Logging screen

Configuration panel / new server:
  h/l    Previous / next tab
  j/k    Previous / next field
  Enter  Edit a field, or cycle a choice
  </>    Cycle a choice
  w      Save           u  Revert
  e      Edit name (new server)
  Esc    Back

Logging:
  j/k    Select handler
  c/u/d  Create, update or delete the handler
  l      Cycle level    r  Reload

  q / Ctrl+C  Quit    ?  Help
"#;

/// Render the key reference.
pub fn render_help(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(POPUP_WIDTH_PERCENT, POPUP_HEIGHT_PERCENT, f.area());
    f.render_widget(Clear, area);

    let p = Paragraph::new(HELP_TEXT)
        .block(
            Block::default()
                .title(" Help (any key to close) ")
                .borders(Borders::ALL)
                .border_style(theme.border_focused()),
        )
        .style(theme.text())
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

/// Create a centered rectangle with the given percentage of the screen size.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let area = centered_rect(60, 70, parent);
        assert_eq!(area.width, 60);
        assert_eq!(area.height, 35);
        assert!(area.x >= 19 && area.x + area.width <= 100);
    }
}
