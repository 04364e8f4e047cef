//! Reporter - render an `AnalysisResult` as text or JSON
//!
//! JSON field names are a stable contract for external tooling:
//! one count per level name, `unparsed`, `total_lines`, `mode`, and
//! `top_errors` as `[{message, count}]` in ranked order.

use crate::error::{LogsiftError, Result};
use crate::level::LogLevel;
use crate::types::{AnalysisResult, ErrorItem};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    error: u64,
    warn: u64,
    info: u64,
    debug: u64,
    unparsed: u64,
    total_lines: u64,
    mode: &'static str,
    top_errors: &'a [ErrorItem],
}

impl<'a> From<&'a AnalysisResult> for JsonReport<'a> {
    fn from(result: &'a AnalysisResult) -> Self {
        Self {
            error: result.count(LogLevel::Error),
            warn: result.count(LogLevel::Warn),
            info: result.count(LogLevel::Info),
            debug: result.count(LogLevel::Debug),
            unparsed: result.unparsed(),
            total_lines: result.total_lines(),
            mode: result.mode().as_str(),
            top_errors: result.top_errors(),
        }
    }
}

/// Formats analysis results for stdout or a file
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    format: ReportFormat,
    color: bool,
    source: Option<String>,
}

impl Reporter {
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            color: false,
            source: None,
        }
    }

    /// Use ANSI colors in the text report. Ignored for JSON.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Name of the analyzed file, shown in the text header
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn render(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            ReportFormat::Json => {
                let mut json = serde_json::to_string_pretty(&JsonReport::from(result))?;
                json.push('\n');
                Ok(json)
            }
            ReportFormat::Text => Ok(self.render_text(result)),
        }
    }

    /// Render and write to `path`, replacing any existing file
    pub fn write_to_path(&self, result: &AnalysisResult, path: &Path) -> Result<()> {
        let rendered = self.render(result)?;
        fs::write(path, rendered).map_err(|source| LogsiftError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn paint(&self, text: &str, level: LogLevel) -> String {
        if self.color {
            text.color(level.color()).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    }

    fn render_text(&self, result: &AnalysisResult) -> String {
        let mut out = String::new();

        let source = self.source.as_deref().unwrap_or("<input>");
        let _ = writeln!(
            out,
            "{} {} ({} mode)",
            self.heading("Log analysis:"),
            source,
            result.mode().as_str()
        );
        out.push('\n');

        let _ = writeln!(out, "{}", self.heading("Level counts"));
        for (level, count) in result.counts().iter() {
            let name = self.paint(&format!("{:<9}", level.as_str()), level);
            let _ = writeln!(
                out,
                "  {} {:>9}  {:>6.1}%",
                name,
                count,
                result.percentage(level)
            );
        }

        let unparsed_pct = if result.total_lines() == 0 {
            0.0
        } else {
            result.unparsed() as f64 * 100.0 / result.total_lines() as f64
        };
        let _ = writeln!(
            out,
            "  {:<9} {:>9}  {:>6.1}%",
            "unparsed",
            result.unparsed(),
            unparsed_pct
        );
        let _ = writeln!(out, "  {:<9} {:>9}", "total", result.total_lines());
        out.push('\n');

        let _ = writeln!(out, "{}", self.heading("Top errors"));
        if result.mode() == crate::analyzer::AnalysisMode::Quick {
            out.push_str("  (not tracked in quick mode)\n");
        } else if result.top_errors().is_empty() {
            out.push_str("  none\n");
        } else {
            for (rank, item) in result.top_errors().iter().enumerate() {
                let count = self.paint(&format!("{:>9}", item.count), LogLevel::Error);
                let _ = writeln!(out, "  {:>3}. {}  {}", rank + 1, count, item.message);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalysisMode, Analyzer};

    fn sample(mode: AnalysisMode) -> AnalysisResult {
        let mut lines = vec!["[ERROR] timeout".to_string(); 3];
        lines.push("[ERROR] disk fail".into());
        lines.push("2024 [WARN] slow query".into());
        lines.push("garbage".into());
        Analyzer::new(mode)
            .analyze_lines(lines.into_iter().map(Ok))
            .unwrap()
    }

    #[test]
    fn test_json_report_shape() {
        let json = Reporter::new(ReportFormat::Json)
            .render(&sample(AnalysisMode::Full))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["error"], 4);
        assert_eq!(value["warn"], 1);
        assert_eq!(value["info"], 0);
        assert_eq!(value["debug"], 0);
        assert_eq!(value["unparsed"], 1);
        assert_eq!(value["total_lines"], 6);
        assert_eq!(value["mode"], "full");
        assert_eq!(value["top_errors"][0]["message"], "timeout");
        assert_eq!(value["top_errors"][0]["count"], 3);
        assert_eq!(value["top_errors"][1]["message"], "disk fail");
    }

    #[test]
    fn test_json_quick_mode_has_empty_top_errors() {
        let json = Reporter::new(ReportFormat::Json)
            .render(&sample(AnalysisMode::Quick))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["top_errors"], serde_json::json!([]));
        assert_eq!(value["mode"], "quick");
    }

    #[test]
    fn test_text_report_plain() {
        let text = Reporter::new(ReportFormat::Text)
            .with_source("app.log")
            .render(&sample(AnalysisMode::Full))
            .unwrap();

        assert!(text.starts_with("Log analysis: app.log (full mode)"));
        assert!(text.contains("ERROR"));
        assert!(text.contains("unparsed"));
        assert!(text.contains("1.         3  timeout"));
        assert!(!text.contains('\u{1b}'), "plain report must not contain ANSI escapes");
    }

    #[test]
    fn test_text_report_quick_mode_note() {
        let text = Reporter::new(ReportFormat::Text)
            .render(&sample(AnalysisMode::Quick))
            .unwrap();
        assert!(text.contains("not tracked in quick mode"));
    }

    #[test]
    fn test_text_report_colored() {
        let text = Reporter::new(ReportFormat::Text)
            .with_color(true)
            .render(&sample(AnalysisMode::Full))
            .unwrap();
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn test_write_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");

        Reporter::new(ReportFormat::Json)
            .write_to_path(&sample(AnalysisMode::Full), &out)
            .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("\"top_errors\""));
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("no/such/dir/report.txt");

        let err = Reporter::new(ReportFormat::Text)
            .write_to_path(&sample(AnalysisMode::Quick), &out)
            .unwrap_err();
        assert!(matches!(err, LogsiftError::Write { .. }));
    }
}
