//! Utilities - layout grid, centered popups and the help overlay

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Screen areas, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserLayout {
    pub header: Rect,
    pub list: Rect,
    /// Zero height unless a search is being typed
    pub search: Rect,
    pub status_bar: Rect,
}

const HEADER_HEIGHT: u16 = 1;
const STATUS_BAR_HEIGHT: u16 = 1;
const SEARCH_HEIGHT: u16 = 3;

pub fn compute_layout(area: Rect, searching: bool) -> BrowserLayout {
    let search_height = if searching { SEARCH_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(search_height),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    BrowserLayout {
        header: chunks[0],
        list: chunks[1],
        search: chunks[2],
        status_bar: chunks[3],
    }
}

/// Rows available for entries inside the bordered list
pub fn list_rows(list: Rect) -> usize {
    usize::from(list.height.saturating_sub(2)).max(1)
}

const HELP_KEYS: &[(&str, &str)] = &[
    ("↑/k ↓/j", "Scroll one line"),
    ("PgUp/PgDn", "Scroll one page"),
    ("Home/g End/G", "Jump to first / last entry"),
    ("f", "Cycle level filter"),
    ("/", "Search messages"),
    ("Enter", "Apply search"),
    ("Esc", "Cancel search / clear filter"),
    ("?/F1", "Toggle help"),
    ("q/Ctrl+C", "Quit"),
];

/// Draw help overlay
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    help_text.extend(HELP_KEYS.iter().map(|(keys, what)| {
        Line::from(vec![
            Span::styled(format!("{:<14}", keys), Style::default().fg(Color::Cyan)),
            Span::raw(format!(" - {}", what)),
        ])
    }));

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )));

    let help_area = popup_area(area, 60, 60);

    let help_block = Paragraph::new(help_text)
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, help_area);
    f.render_widget(help_block, help_area);
}

/// Popup of `percent_x` by `percent_y` of `area`, centered in it.
/// Percentages above 100 are treated as 100.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let scale = |len: u16, percent: u16| -> u16 {
        (u32::from(len) * u32::from(percent.min(100)) / 100) as u16
    };

    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_without_search() {
        let layout = compute_layout(Rect::new(0, 0, 80, 24), false);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.search.height, 0);
        assert_eq!(layout.list.height, 22);
        assert_eq!(list_rows(layout.list), 20);
    }

    #[test]
    fn test_layout_with_search() {
        let layout = compute_layout(Rect::new(0, 0, 80, 24), true);
        assert_eq!(layout.search.height, 3);
        assert_eq!(layout.list.height, 19);
    }

    #[test]
    fn test_tiny_terminal_still_has_a_row() {
        let layout = compute_layout(Rect::new(0, 0, 20, 2), false);
        assert_eq!(list_rows(layout.list), 1);
    }

    #[test]
    fn test_popup_area_centered() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = popup_area(area, 60, 60);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 30);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn test_popup_area_offset_and_clamped() {
        let area = Rect::new(10, 4, 41, 9);
        let popup = popup_area(area, 150, 50);
        assert_eq!(popup.width, 41);
        assert_eq!(popup.height, 4);
        assert_eq!(popup.x, 10);
        assert_eq!(popup.y, 6);
    }
}
