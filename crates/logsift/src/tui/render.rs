//! Rendering - header, entry list, search bar and status bar

use owo_colors::AnsiColors;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{BrowserState, Mode};
use super::utils::{compute_layout, draw_help_overlay, BrowserLayout};
use logsift_common::{LogEntry, LogLevel};

/// Layout for the current frame size and mode
pub fn layout_for(area: Rect, state: &BrowserState) -> BrowserLayout {
    compute_layout(area, state.mode() == Mode::Searching)
}

pub fn draw_ui(f: &mut Frame, state: &BrowserState) {
    let size = f.size();
    let layout = layout_for(size, state);

    draw_header(f, layout.header, state);
    draw_entries(f, layout.list, state);
    if state.mode() == Mode::Searching {
        draw_search_bar(f, layout.search, state);
    }
    draw_status_bar(f, layout.status_bar, state);

    if state.mode() == Mode::Help {
        draw_help_overlay(f, size);
    }
}

/// Terminal color for a level, shared with the colored text report
pub fn level_color(level: LogLevel) -> Color {
    match level.color() {
        AnsiColors::Red => Color::Red,
        AnsiColors::Yellow => Color::Yellow,
        AnsiColors::Green => Color::Green,
        AnsiColors::BrightBlack => Color::DarkGray,
        _ => Color::Reset,
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &BrowserState) {
    let counts = state.level_counts();
    let mut spans = vec![
        Span::styled(
            format!(" logsift {} ", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {} ", state.source())),
    ];

    for (level, count) in counts.iter() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{}:{}", level.as_str(), count),
            Style::default().fg(level_color(level)),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn entry_line(entry: &LogEntry) -> Line<'_> {
    let color = level_color(entry.level);
    let mut spans = vec![
        Span::styled(entry.timestamp.as_str(), Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("{:<7}", entry.level.tag()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    if let Some(source) = &entry.source {
        spans.push(Span::styled(
            format!("({}) ", source),
            Style::default().fg(Color::Blue),
        ));
    }
    spans.push(Span::styled(entry.message.as_str(), Style::default().fg(color)));
    Line::from(spans)
}

fn draw_entries(f: &mut Frame, area: Rect, state: &BrowserState) {
    let lines: Vec<Line> = state.page().into_iter().map(entry_line).collect();

    let title = match state.list_mode() {
        Mode::Filtered if state.query().is_empty() => {
            format!(" Filtered: {} ", state.filter().label())
        }
        Mode::Filtered => format!(
            " Filtered: {} | \"{}\" ",
            state.filter().label(),
            state.query()
        ),
        _ => " All entries ".to_string(),
    };

    let body = if lines.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "No matching entries",
            Style::default().fg(Color::DarkGray),
        )))
    } else {
        Paragraph::new(lines)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    f.render_widget(body.block(block), area);
}

fn draw_search_bar(f: &mut Frame, area: Rect, state: &BrowserState) {
    let input = Line::from(vec![
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(state.draft()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]);

    let bar = Paragraph::new(input).block(
        Block::default()
            .title(" Search (Enter to apply, Esc to cancel) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(bar, area);
}

/// Position and totals, e.g. `rows 21-40 of 312 | 3 unparsed | ? help`
pub fn status_text(state: &BrowserState) -> String {
    let len = state.visible_len();
    let first = if len == 0 { 0 } else { state.offset() + 1 };
    let last = (state.offset() + state.page_size()).min(len);

    let mut text = format!(" rows {}-{} of {}", first, last, len);
    if state.list_mode() == Mode::Filtered {
        text.push_str(&format!(" (of {} entries)", state.total_entries()));
        text.push_str(&format!(" | filter: {}", state.filter().label()));
        if !state.query().is_empty() {
            text.push_str(&format!(" | search: {}", state.query()));
        }
    }
    if state.unparsed() > 0 {
        text.push_str(&format!(" | {} unparsed", state.unparsed()));
    }
    if state.truncated() {
        text.push_str(" | truncated");
    }
    text.push_str(" | ? help  q quit");
    text
}

fn draw_status_bar(f: &mut Frame, area: Rect, state: &BrowserState) {
    let bar = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    f.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::{Action, LoadedLog};

    fn state(n: usize, unparsed: u64) -> BrowserState {
        let entries = (0..n)
            .map(|i| LogEntry::new("t", LogLevel::Info, format!("m{i}")))
            .collect();
        let loaded = LoadedLog {
            entries,
            unparsed,
            lines_read: n as u64 + unparsed,
            truncated: false,
        };
        BrowserState::new("app.log", loaded, 10)
    }

    #[test]
    fn test_status_text_positions() {
        let mut s = state(25, 0);
        assert_eq!(status_text(&s), " rows 1-10 of 25 | ? help  q quit");
        s.apply(Action::Bottom);
        assert!(status_text(&s).starts_with(" rows 16-25 of 25"));
    }

    #[test]
    fn test_status_text_empty_filter() {
        let mut s = state(5, 2);
        s.apply(Action::CycleFilter);
        let text = status_text(&s);
        assert!(text.starts_with(" rows 0-0 of 0 (of 5 entries) | filter: ERROR"));
        assert!(text.contains("2 unparsed"));
    }

    #[test]
    fn test_level_colors_distinct() {
        let colors: std::collections::HashSet<_> =
            LogLevel::ALL.iter().map(|l| format!("{:?}", level_color(*l))).collect();
        assert_eq!(colors.len(), 4);
    }
}
