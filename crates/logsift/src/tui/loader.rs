//! Loader - read a log file into memory for browsing

use logsift_common::{parse_line, LogEntry, LogReader, Result};
use std::path::Path;
use tracing::debug;

/// Parsed entries of one file, plus what was skipped
#[derive(Debug, Default)]
pub struct LoadedLog {
    pub entries: Vec<LogEntry>,
    /// Lines that matched neither format
    pub unparsed: u64,
    pub lines_read: u64,
    /// True when a line limit stopped the read early
    pub truncated: bool,
}

/// Read `path`, keeping parsed entries. With `limit`, stop after that many
/// lines; the file handle is released as soon as reading stops.
pub fn load_entries(path: &Path, limit: Option<usize>, buffer_capacity: usize) -> Result<LoadedLog> {
    let mut reader = LogReader::open_with_capacity(path, buffer_capacity)?;
    let mut loaded = LoadedLog::default();

    let max_lines = limit.unwrap_or(usize::MAX);
    for line in reader.by_ref().take(max_lines) {
        let line = line?;
        loaded.lines_read += 1;
        match parse_line(&line) {
            Some(entry) => loaded.entries.push(entry),
            None => loaded.unparsed += 1,
        }
    }

    loaded.truncated = match limit {
        Some(n) if loaded.lines_read >= n as u64 => reader.next().is_some(),
        _ => false,
    };
    drop(reader);

    debug!(
        entries = loaded.entries.len(),
        unparsed = loaded.unparsed,
        truncated = loaded.truncated,
        "loaded entries for browsing"
    );
    Ok(loaded)
}
