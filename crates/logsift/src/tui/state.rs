//! Browser state machine
//!
//! States: `Viewing` (all entries), `Filtered` (level filter and/or search
//! query active), `Searching` (typing a query), `Help` (overlay) and
//! `Exiting`. Key presses arrive as `Action`s; nothing else changes state.
//!
//! `Searching` and `Help` are modal and remember which of `Viewing` or
//! `Filtered` to return to. Scroll offsets are clamped so the last page is
//! always full when there are enough rows.

use super::loader::LoadedLog;
use logsift_common::{LevelCounts, LogEntry, LogLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Filtered,
    Searching,
    Help,
    Exiting,
}

/// Level filter, cycled All -> Error -> Warn -> Info -> Debug -> All
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelFilter {
    #[default]
    All,
    Only(LogLevel),
}

impl LevelFilter {
    pub fn next(self) -> Self {
        match self {
            LevelFilter::All => LevelFilter::Only(LogLevel::Error),
            LevelFilter::Only(LogLevel::Error) => LevelFilter::Only(LogLevel::Warn),
            LevelFilter::Only(LogLevel::Warn) => LevelFilter::Only(LogLevel::Info),
            LevelFilter::Only(LogLevel::Info) => LevelFilter::Only(LogLevel::Debug),
            LevelFilter::Only(LogLevel::Debug) => LevelFilter::All,
        }
    }

    pub fn matches(self, level: LogLevel) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Only(only) => only == level,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LevelFilter::All => "ALL",
            LevelFilter::Only(level) => level.as_str(),
        }
    }
}

/// Everything a key press can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    CycleFilter,
    StartSearch,
    Input(char),
    Backspace,
    Confirm,
    Back,
    ToggleHelp,
    Quit,
}

/// Central browser state - everything rendered on screen comes from this
#[derive(Debug)]
pub struct BrowserState {
    source: String,
    entries: Vec<LogEntry>,
    unparsed: u64,
    truncated: bool,
    level_counts: LevelCounts,

    mode: Mode,
    /// Non-modal state to return to from `Searching` / `Help`
    resume: Mode,

    filter: LevelFilter,
    query: String,
    draft: String,
    /// Indices into `entries` matching filter and query
    matches: Vec<usize>,

    view_offset: usize,
    filtered_offset: usize,
    page_size: usize,
}

impl BrowserState {
    pub fn new(source: impl Into<String>, loaded: LoadedLog, page_size: usize) -> Self {
        let mut level_counts = LevelCounts::default();
        for entry in &loaded.entries {
            level_counts.increment(entry.level);
        }

        Self {
            source: source.into(),
            entries: loaded.entries,
            unparsed: loaded.unparsed,
            truncated: loaded.truncated,
            level_counts,
            mode: Mode::Viewing,
            resume: Mode::Viewing,
            filter: LevelFilter::All,
            query: String::new(),
            draft: String::new(),
            matches: Vec::new(),
            view_offset: 0,
            filtered_offset: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The list currently shown underneath any overlay
    pub fn list_mode(&self) -> Mode {
        match self.mode {
            Mode::Viewing | Mode::Filtered => self.mode,
            _ => self.resume,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn filter(&self) -> LevelFilter {
        self.filter
    }

    /// Confirmed search query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Query being typed in `Searching`
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn unparsed(&self) -> u64 {
        self.unparsed
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn level_counts(&self) -> &LevelCounts {
        &self.level_counts
    }

    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows in the list currently shown
    pub fn visible_len(&self) -> usize {
        match self.list_mode() {
            Mode::Filtered => self.matches.len(),
            _ => self.entries.len(),
        }
    }

    /// Top row of the list currently shown
    pub fn offset(&self) -> usize {
        match self.list_mode() {
            Mode::Filtered => self.filtered_offset,
            _ => self.view_offset,
        }
    }

    /// Entries on the current page, top to bottom
    pub fn page(&self) -> Vec<&LogEntry> {
        let start = self.offset();
        let end = (start + self.page_size).min(self.visible_len());

        match self.list_mode() {
            Mode::Filtered => self.matches[start..end]
                .iter()
                .map(|&i| &self.entries[i])
                .collect(),
            _ => self.entries[start..end].iter().collect(),
        }
    }

    /// Resize the page, e.g. after a terminal resize
    pub fn set_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
        self.view_offset = self.view_offset.min(self.max_offset(self.entries.len()));
        self.filtered_offset = self.filtered_offset.min(self.max_offset(self.matches.len()));
    }

    pub fn apply(&mut self, action: Action) {
        match self.mode {
            Mode::Exiting => {}
            Mode::Help => match action {
                Action::ToggleHelp | Action::Back => self.mode = self.resume,
                Action::Quit => self.mode = Mode::Exiting,
                _ => {}
            },
            Mode::Searching => match action {
                Action::Input(c) => self.draft.push(c),
                Action::Backspace => {
                    self.draft.pop();
                }
                Action::Confirm => {
                    self.query = std::mem::take(&mut self.draft);
                    self.refilter();
                }
                Action::Back => {
                    self.draft.clear();
                    self.mode = self.resume;
                }
                Action::Quit => self.mode = Mode::Exiting,
                _ => {}
            },
            Mode::Viewing | Mode::Filtered => self.apply_to_list(action),
        }
    }

    fn apply_to_list(&mut self, action: Action) {
        match action {
            Action::LineUp => self.scroll_up(1),
            Action::LineDown => self.scroll_down(1),
            Action::PageUp => self.scroll_up(self.page_size),
            Action::PageDown => self.scroll_down(self.page_size),
            Action::Top => self.set_offset(0),
            Action::Bottom => self.set_offset(usize::MAX),
            Action::CycleFilter => {
                self.filter = self.filter.next();
                self.refilter();
            }
            Action::StartSearch => {
                self.resume = self.mode;
                self.draft = self.query.clone();
                self.mode = Mode::Searching;
            }
            Action::ToggleHelp => {
                self.resume = self.mode;
                self.mode = Mode::Help;
            }
            Action::Back => {
                if self.mode == Mode::Filtered {
                    self.filter = LevelFilter::All;
                    self.query.clear();
                    self.refilter();
                }
            }
            Action::Quit => self.mode = Mode::Exiting,
            Action::Input(_) | Action::Backspace | Action::Confirm => {}
        }
    }

    /// Re-derive the filtered list from the in-memory entries
    fn refilter(&mut self) {
        self.filtered_offset = 0;

        if self.filter == LevelFilter::All && self.query.is_empty() {
            self.matches.clear();
            self.mode = Mode::Viewing;
            self.resume = Mode::Viewing;
            return;
        }

        let filter = self.filter;
        let query = self.query.as_str();
        self.matches = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| filter.matches(entry.level) && entry.message.contains(query))
            .map(|(i, _)| i)
            .collect();
        self.mode = Mode::Filtered;
        self.resume = Mode::Filtered;
    }

    fn max_offset(&self, len: usize) -> usize {
        len.saturating_sub(self.page_size)
    }

    fn set_offset(&mut self, offset: usize) {
        let clamped = offset.min(self.max_offset(self.visible_len()));
        match self.list_mode() {
            Mode::Filtered => self.filtered_offset = clamped,
            _ => self.view_offset = clamped,
        }
    }

    fn scroll_up(&mut self, rows: usize) {
        self.set_offset(self.offset().saturating_sub(rows));
    }

    fn scroll_down(&mut self, rows: usize) {
        self.set_offset(self.offset().saturating_add(rows));
    }
}
