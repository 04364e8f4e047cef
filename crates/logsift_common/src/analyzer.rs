//! Analyzer - one sequential pass from reader through parser to statistics
//!
//! Quick mode keeps only per-level counters (constant memory). Full mode also
//! tallies distinct error messages (memory grows with distinct messages, not
//! lines) and ranks them at the end of the pass.
//!
//! Unparsed lines never fail a pass. The first I/O error aborts it and the
//! counts gathered so far are dropped.

use crate::error::Result;
use crate::level::LogLevel;
use crate::parser::parse_line;
use crate::reader::{LogReader, DEFAULT_BUFFER_CAPACITY};
use crate::types::{AnalysisResult, ErrorItem, LevelCounts};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Default cap on the ranked error list
pub const DEFAULT_TOP_ERRORS: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Level counts only
    Quick,
    /// Level counts plus ranked error messages
    #[default]
    Full,
}

impl AnalysisMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Quick => "quick",
            AnalysisMode::Full => "full",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tally {
    first_seen: usize,
    count: u64,
}

/// Running count per distinct error message, remembering arrival order
#[derive(Debug, Default)]
struct ErrorTally {
    seen: HashMap<String, Tally>,
}

impl ErrorTally {
    fn record(&mut self, message: &str) {
        if let Some(tally) = self.seen.get_mut(message) {
            tally.count += 1;
            return;
        }

        let first_seen = self.seen.len();
        self.seen.insert(
            message.to_owned(),
            Tally {
                first_seen,
                count: 1,
            },
        );
    }

    /// Count descending; the earlier message wins a tie
    fn into_ranked(self, cap: usize) -> Vec<ErrorItem> {
        let mut ranked: Vec<(String, Tally)> = self.seen.into_iter().collect();
        ranked.sort_unstable_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        ranked.truncate(cap);

        ranked
            .into_iter()
            .map(|(message, tally)| ErrorItem {
                message,
                count: tally.count,
            })
            .collect()
    }
}

/// Drives one analysis pass
#[derive(Debug, Clone)]
pub struct Analyzer {
    mode: AnalysisMode,
    top_errors: usize,
    buffer_capacity: usize,
}

impl Analyzer {
    pub fn new(mode: AnalysisMode) -> Self {
        Self {
            mode,
            top_errors: DEFAULT_TOP_ERRORS,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }

    /// Cap the ranked error list at `cap` items
    pub fn with_top_errors(mut self, cap: usize) -> Self {
        self.top_errors = cap;
        self
    }

    /// Chunk size used when reading files
    pub fn with_buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = bytes;
        self
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Open `path` and analyze it to the end
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let path = path.as_ref();
        debug!(path = %path.display(), mode = self.mode.as_str(), "starting analysis pass");

        let reader = LogReader::open_with_capacity(path, self.buffer_capacity)?;
        self.analyze_lines(reader)
    }

    /// Analyze any line source. Stops at the first error.
    pub fn analyze_lines<I, S>(&self, lines: I) -> Result<AnalysisResult>
    where
        I: IntoIterator<Item = Result<S>>,
        S: AsRef<str>,
    {
        let mut counts = LevelCounts::default();
        let mut unparsed: u64 = 0;
        let mut lines_seen: u64 = 0;
        let mut tally = match self.mode {
            AnalysisMode::Quick => None,
            AnalysisMode::Full => Some(ErrorTally::default()),
        };

        for line in lines {
            let line = line?;
            lines_seen += 1;

            match parse_line(line.as_ref()) {
                Some(entry) => {
                    counts.increment(entry.level);
                    if entry.level == LogLevel::Error {
                        if let Some(tally) = tally.as_mut() {
                            tally.record(&entry.message);
                        }
                    }
                }
                None => unparsed += 1,
            }
        }

        debug_assert_eq!(counts.total() + unparsed, lines_seen);

        let top_errors = tally
            .map(|t| t.into_ranked(self.top_errors))
            .unwrap_or_default();

        debug!(
            lines = lines_seen,
            unparsed,
            ranked_errors = top_errors.len(),
            "analysis pass finished"
        );

        Ok(AnalysisResult::new(self.mode, counts, unparsed, top_errors))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogsiftError;
    use std::io;
    use std::path::PathBuf;

    fn ok_lines(lines: &[&str]) -> Vec<Result<String>> {
        lines.iter().map(|l| Ok(l.to_string())).collect()
    }

    #[test]
    fn test_unparsed_line_counted() {
        let result = Analyzer::new(AnalysisMode::Full)
            .analyze_lines(ok_lines(&["random text without brackets"]))
            .unwrap();

        assert_eq!(result.unparsed(), 1);
        assert_eq!(result.counts().total(), 0);
        assert!(result.top_errors().is_empty());
    }

    #[test]
    fn test_json_category_outside_table_is_unparsed() {
        let result = Analyzer::new(AnalysisMode::Full)
            .analyze_lines(ok_lines(&[
                r#"{"timestamp":"t","category":"ERROR","message":"m"}"#,
                r#"{"timestamp":"t","category":"error","message":"m"}"#,
            ]))
            .unwrap();

        assert_eq!(result.unparsed(), 1);
        assert_eq!(result.count(LogLevel::Error), 1);
        assert_eq!(result.top_errors()[0].count, 1);
    }

    #[test]
    fn test_top_errors_ranked_by_count() {
        let mut lines = vec!["[ERROR] disk fail"; 50];
        lines.extend(vec!["[ERROR] timeout"; 100]);

        let result = Analyzer::new(AnalysisMode::Full)
            .analyze_lines(ok_lines(&lines))
            .unwrap();

        assert_eq!(
            result.top_errors(),
            &[
                ErrorItem {
                    message: "timeout".into(),
                    count: 100
                },
                ErrorItem {
                    message: "disk fail".into(),
                    count: 50
                },
            ]
        );
        assert_eq!(result.count(LogLevel::Error), 150);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let lines = [
            "[ERROR] beta",
            "[ERROR] alpha",
            "[ERROR] gamma",
            "[ERROR] alpha",
            "[ERROR] beta",
            "[ERROR] gamma",
        ];
        let result = Analyzer::new(AnalysisMode::Full)
            .analyze_lines(ok_lines(&lines))
            .unwrap();

        let order: Vec<&str> = result.top_errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(order, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn test_only_error_level_is_ranked() {
        let lines = ["[WARN] slow", "[WARN] slow", "[ERROR] broken", "[INFO] ok"];
        let result = Analyzer::new(AnalysisMode::Full)
            .analyze_lines(ok_lines(&lines))
            .unwrap();

        assert_eq!(result.top_errors().len(), 1);
        assert_eq!(result.top_errors()[0].message, "broken");
    }

    #[test]
    fn test_cap_limits_top_errors() {
        let lines: Vec<String> = (0..25).map(|i| format!("[ERROR] failure {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

        let result = Analyzer::new(AnalysisMode::Full)
            .with_top_errors(3)
            .analyze_lines(ok_lines(&refs))
            .unwrap();

        assert_eq!(result.top_errors().len(), 3);
        assert_eq!(result.top_errors()[0].message, "failure 0");
    }

    #[test]
    fn test_default_cap() {
        let lines: Vec<String> = (0..40).map(|i| format!("[ERROR] e{i}")).collect();
        let result = Analyzer::default()
            .analyze_lines(lines.into_iter().map(Ok))
            .unwrap();
        assert_eq!(result.top_errors().len(), DEFAULT_TOP_ERRORS);
    }

    #[test]
    fn test_quick_and_full_counts_match() {
        let lines = [
            "2024 [ERROR] a",
            "2024 [WARN] b",
            "{\"timestamp\":\"t\",\"category\":\"audit\",\"message\":\"c\"}",
            "noise",
            "",
            "2024 [DEBUG] d",
            "2024 [ERROR] a",
        ];

        let quick = Analyzer::new(AnalysisMode::Quick)
            .analyze_lines(ok_lines(&lines))
            .unwrap();
        let full = Analyzer::new(AnalysisMode::Full)
            .analyze_lines(ok_lines(&lines))
            .unwrap();

        assert_eq!(quick.counts(), full.counts());
        assert_eq!(quick.unparsed(), full.unparsed());
        assert_eq!(quick.unparsed(), 2);
        assert!(quick.top_errors().is_empty());
        assert_eq!(full.top_errors().len(), 1);
        assert_eq!(full.top_errors()[0].count, 2);
    }

    #[test]
    fn test_io_error_aborts_pass() {
        let lines: Vec<Result<String>> = vec![
            Ok("[ERROR] first".into()),
            Err(LogsiftError::Read {
                path: PathBuf::from("x.log"),
                line: 1,
                source: io::Error::new(io::ErrorKind::Other, "boom"),
            }),
            Ok("[ERROR] never seen".into()),
        ];

        let err = Analyzer::new(AnalysisMode::Full)
            .analyze_lines(lines)
            .expect_err("I/O failure must abort the pass");
        assert!(err.is_io());
    }

    #[test]
    fn test_empty_input() {
        let result = Analyzer::new(AnalysisMode::Full)
            .analyze_lines(Vec::<Result<String>>::new())
            .unwrap();
        assert_eq!(result.total_lines(), 0);
        assert!(result.top_errors().is_empty());
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(AnalysisMode::Quick.as_str(), "quick");
        assert_eq!(AnalysisMode::default(), AnalysisMode::Full);
    }
}
