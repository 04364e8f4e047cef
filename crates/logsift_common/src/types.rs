//! Core data model: parsed entries and analysis results.

use crate::analyzer::AnalysisMode;
use crate::level::LogLevel;
use serde::Serialize;

/// One successfully parsed log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Free-text timestamp, trimmed, never parsed into a date
    pub timestamp: String,

    pub level: LogLevel,

    /// Message text, trimmed
    pub message: String,

    /// Emitting component, only present for JSON lines that carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl LogEntry {
    pub fn new(timestamp: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            level,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Frequency of one distinct error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorItem {
    pub message: String,
    pub count: u64,
}

/// Per-level line counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts([u64; 4]);

impl LevelCounts {
    pub fn get(&self, level: LogLevel) -> u64 {
        self.0[level.index()]
    }

    pub fn increment(&mut self, level: LogLevel) {
        self.0[level.index()] += 1;
    }

    /// Sum over all levels
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// `(level, count)` pairs, most severe first
    pub fn iter(&self) -> impl Iterator<Item = (LogLevel, u64)> + '_ {
        LogLevel::ALL
            .iter()
            .rev()
            .map(move |level| (*level, self.get(*level)))
    }
}

/// Outcome of one analyzer pass. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    mode: AnalysisMode,
    counts: LevelCounts,
    unparsed: u64,
    top_errors: Vec<ErrorItem>,
}

impl AnalysisResult {
    pub(crate) fn new(
        mode: AnalysisMode,
        counts: LevelCounts,
        unparsed: u64,
        top_errors: Vec<ErrorItem>,
    ) -> Self {
        Self {
            mode,
            counts,
            unparsed,
            top_errors,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn counts(&self) -> &LevelCounts {
        &self.counts
    }

    pub fn count(&self, level: LogLevel) -> u64 {
        self.counts.get(level)
    }

    /// Lines that matched neither format
    pub fn unparsed(&self) -> u64 {
        self.unparsed
    }

    /// Most frequent error messages, count descending, first-seen on ties.
    /// Always empty in quick mode.
    pub fn top_errors(&self) -> &[ErrorItem] {
        &self.top_errors
    }

    /// Every line read during the pass, parsed or not
    pub fn total_lines(&self) -> u64 {
        self.counts.total() + self.unparsed
    }

    /// Share of `total_lines` taken by `level`, as a percentage
    pub fn percentage(&self, level: LogLevel) -> f64 {
        let total = self.total_lines();
        if total == 0 {
            return 0.0;
        }
        self.counts.get(level) as f64 * 100.0 / total as f64
    }
}
