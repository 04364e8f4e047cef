//! Severity levels recognised by the parser.

use owo_colors::AnsiColors;
use serde::Serialize;
use std::fmt;

/// Severity level for log entries, ordered `Debug < Info < Warn < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// All levels, lowest severity first
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Upper-case display name, as it appears inside a bracket tag
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// The exact bracket tag for this level, e.g. `[WARN]`
    pub const fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Info => "[INFO]",
            LogLevel::Warn => "[WARN]",
            LogLevel::Error => "[ERROR]",
        }
    }

    /// Terminal color used when rendering this level
    pub const fn color(self) -> AnsiColors {
        match self {
            LogLevel::Debug => AnsiColors::BrightBlack,
            LogLevel::Info => AnsiColors::Green,
            LogLevel::Warn => AnsiColors::Yellow,
            LogLevel::Error => AnsiColors::Red,
        }
    }

    /// Dense index in `0..4`, follows the ordering
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Map a JSON `category` value to a level.
    ///
    /// Names match exactly, lower case and untrimmed. `audit` entries count
    /// as informational. Anything else is unknown.
    pub fn from_category(category: &str) -> Option<Self> {
        const CATEGORIES: [(&str, LogLevel); 5] = [
            ("error", LogLevel::Error),
            ("warn", LogLevel::Warn),
            ("info", LogLevel::Info),
            ("debug", LogLevel::Debug),
            ("audit", LogLevel::Info),
        ];

        CATEGORIES
            .iter()
            .find(|(name, _)| category == *name)
            .map(|(_, level)| *level)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_totally_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);

        let mut shuffled = vec![LogLevel::Warn, LogLevel::Error, LogLevel::Debug, LogLevel::Info];
        shuffled.sort();
        assert_eq!(shuffled, LogLevel::ALL.to_vec());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, level) in LogLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }

    #[test]
    fn test_category_table() {
        assert_eq!(LogLevel::from_category("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_category("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_category("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_category("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_category("audit"), Some(LogLevel::Info), "audit counts as info");
        assert_eq!(LogLevel::from_category("job"), None);
        assert_eq!(LogLevel::from_category(""), None);
    }

    #[test]
    fn test_category_match_is_exact() {
        assert_eq!(LogLevel::from_category("ERROR"), None);
        assert_eq!(LogLevel::from_category("Warn"), None);
        assert_eq!(LogLevel::from_category(" info "), None);
        assert_eq!(LogLevel::from_category("Audit"), None);
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:<6}|", LogLevel::Info), "INFO  |");
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
    }
}
