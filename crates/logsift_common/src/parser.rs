//! Line parser - classify one line and split it into a `LogEntry`
//!
//! Two conventions are understood:
//! - bracket: `<timestamp> [LEVEL] <message>`
//! - JSON: one flat object per line with `timestamp`, `category`, `message`
//!
//! The format is chosen from the first character only. A line starting with
//! `{` that fails JSON extraction is NOT retried as bracket text.
//!
//! Known limitation: JSON fields are located by substring search, not by a
//! real JSON parser. Escaped quotes inside values, nested objects that reuse
//! the field names, and non-string values are not handled.

use crate::level::LogLevel;
use crate::types::LogEntry;

/// Shortest valid tag, `[INFO]`
const MIN_TAG_LEN: usize = 6;

/// Furthest the closing `]` may sit from the opening `[`
const MAX_TAG_WINDOW: usize = 8;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a
const fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Precomputed tag hashes. A hit is only a candidate; the tag text is
/// compared exactly before it is accepted.
const TAG_HASHES: [(u32, LogLevel); 4] = [
    (fnv1a(LogLevel::Error.tag().as_bytes()), LogLevel::Error),
    (fnv1a(LogLevel::Warn.tag().as_bytes()), LogLevel::Warn),
    (fnv1a(LogLevel::Info.tag().as_bytes()), LogLevel::Info),
    (fnv1a(LogLevel::Debug.tag().as_bytes()), LogLevel::Debug),
];

const TIMESTAMP_KEY: &str = "\"timestamp\":";
const CATEGORY_KEY: &str = "\"category\":";
const MESSAGE_KEY: &str = "\"message\":";
const SOURCE_KEY: &str = "\"source\":";

/// Line conventions the parser dispatches between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    Bracket,
    Json,
}

impl LineFormat {
    /// Pick the format from the first character of the line
    pub fn detect(line: &str) -> Self {
        if line.starts_with('{') {
            LineFormat::Json
        } else {
            LineFormat::Bracket
        }
    }
}

/// Where the level tag sits within a bracket line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TagSpan {
    open: usize,
    close: usize,
    level: LogLevel,
}

/// Parse one line. `None` means the line matches neither format; this is the
/// normal outcome for blank lines, banners and stack-trace continuations.
pub fn parse_line(line: &str) -> Option<LogEntry> {
    match LineFormat::detect(line) {
        LineFormat::Bracket => parse_bracket(line),
        LineFormat::Json => parse_json(line),
    }
}

/// Parse `<timestamp> [LEVEL] <message>`
pub fn parse_bracket(line: &str) -> Option<LogEntry> {
    let span = find_tag(line)?;

    let timestamp = line[..span.open].trim();

    let rest = &line[span.close + 1..];
    let rest = rest
        .strip_prefix(|c: char| c == ' ' || c == '\t')
        .unwrap_or(rest);
    let message = rest.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'));

    Some(LogEntry::new(timestamp, span.level, message))
}

fn find_tag(line: &str) -> Option<TagSpan> {
    let open = line.find('[')?;
    let bytes = line.as_bytes();

    if bytes.len() - open < MIN_TAG_LEN {
        return None;
    }

    let window_end = (open + MAX_TAG_WINDOW + 1).min(bytes.len());
    let close = open + 1 + bytes[open + 1..window_end].iter().position(|&b| b == b']')?;

    let tag = &bytes[open..=close];
    let hash = fnv1a(tag);
    let level = TAG_HASHES
        .iter()
        .find(|(candidate, _)| *candidate == hash)
        .map(|(_, level)| *level)?;

    if level.tag().as_bytes() != tag {
        return None;
    }

    Some(TagSpan { open, close, level })
}

/// Parse a flat JSON object line
pub fn parse_json(line: &str) -> Option<LogEntry> {
    let category = json_string_field(line, CATEGORY_KEY)?;
    let level = LogLevel::from_category(category)?;
    let timestamp = json_string_field(line, TIMESTAMP_KEY)?;
    let message = json_string_field(line, MESSAGE_KEY)?;

    let mut entry = LogEntry::new(timestamp.trim(), level, message.trim());
    if let Some(source) = json_string_field(line, SOURCE_KEY) {
        entry = entry.with_source(source.trim());
    }
    Some(entry)
}

/// Value of the first `"key": "value"` pair. Does not understand escapes.
fn json_string_field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let start = line.find(key)? + key.len();
    let value = line[start..].trim_start().strip_prefix('"')?;
    let end = value.find('"')?;
    Some(&value[..end])
}
