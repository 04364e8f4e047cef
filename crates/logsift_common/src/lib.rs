//! Logsift Common - log parsing and analysis engine
//!
//! Leaf-first: parser -> reader -> analyzer -> report.
//! Everything here is synchronous and single-threaded; the CLI and TUI in the
//! `logsift` crate are the only callers.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod level;
pub mod parser;
pub mod reader;
pub mod report;
pub mod types;

pub use analyzer::{AnalysisMode, Analyzer, DEFAULT_TOP_ERRORS};
pub use config::LogsiftConfig;
pub use error::{LogsiftError, Result};
pub use level::LogLevel;
pub use parser::{parse_line, LineFormat};
pub use reader::LogReader;
pub use report::{ReportFormat, Reporter};
pub use types::{AnalysisResult, ErrorItem, LevelCounts, LogEntry};
