//! Property tests for the line parser.

use logsift_common::{parse_line, LogLevel};
use proptest::prelude::*;

fn level_strategy() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

proptest! {
    #[test]
    fn bracket_lines_round_trip(
        ts in "[0-9A-Za-z:.\\- ]{0,24}",
        level in level_strategy(),
        msg in "[ -~]{0,60}",
    ) {
        let line = format!("{} {} {}", ts, level.tag(), msg);
        let entry = parse_line(&line).expect("well-formed bracket line must parse");

        prop_assert_eq!(entry.timestamp, ts.trim());
        prop_assert_eq!(entry.level, level);
        prop_assert_eq!(entry.message, msg.trim_matches(' '));
        prop_assert!(entry.source.is_none());
    }

    #[test]
    fn json_lines_keep_field_values(
        ts in "[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9:]{8}Z",
        category in prop::sample::select(vec!["error", "warn", "info", "debug", "audit"]),
        msg in "[A-Za-z0-9][A-Za-z0-9 .,:]{0,30}[A-Za-z0-9]",
    ) {
        let line = format!(
            r#"{{"timestamp":"{}","category":"{}","message":"{}"}}"#,
            ts, category, msg
        );
        let entry = parse_line(&line).expect("JSON line with known category must parse");

        let expected = LogLevel::from_category(category).unwrap();
        prop_assert_eq!(entry.level, expected);
        prop_assert_eq!(entry.timestamp, ts);
        prop_assert_eq!(entry.message, msg);
    }

    #[test]
    fn arbitrary_input_never_panics(line in ".{0,200}") {
        let _ = parse_line(&line);
    }

    #[test]
    fn unknown_tags_are_unparsed(tag in "[A-Z]{3,6}", msg in "[a-z ]{0,20}") {
        prop_assume!(!["ERROR", "WARN", "INFO", "DEBUG"].contains(&tag.as_str()));
        let line = format!("2024-01-01 [{}] {}", tag, msg);
        prop_assert!(parse_line(&line).is_none());
    }
}

#[test]
fn test_json_without_category_is_unparsed() {
    let line = r#"{"timestamp":"2024-01-01T10:00:00Z","message":"Low memory"}"#;
    assert!(parse_line(line).is_none());
}

#[test]
fn test_trace_tag_is_unparsed() {
    assert!(parse_line("2024-01-01 10:00:00 [TRACE] entering loop").is_none());
}
