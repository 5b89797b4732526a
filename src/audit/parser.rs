//! Line parser for pipe-delimited audit log entries.
//!
//! Expected line layout:
//!
//! ```text
//! <LEVEL> <STAGE> <DATE> <TIME>, <CLASS> - host:/<ip>|source:/<ip>|user:<name>|...
//! ```
//!
//! The first five whitespace tokens form the header. The rest of the line is
//! read as `key:value` segments separated by `|`.

use super::types::{Field, LogRecord, OperationRecord};
use thiserror::Error;

/// Minimum number of whitespace-separated header tokens
pub const MIN_FIELDS: usize = 5;

/// Marker that precedes the first segment on lines carrying a restated prefix
const HOST_MARKER: &str = " - host:/";

/// Errors produced while parsing a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Fewer than five whitespace-separated tokens
    #[error("truncated line: expected at least 5 whitespace-separated fields, found {found}")]
    Truncated { found: usize },

    /// The `operation` value has no `.` between message and operation name.
    ///
    /// `recovered` holds the rest of the parsed line, with the whole value
    /// kept as `operation_message`.
    #[error("malformed operation value {value:?}: no '.' between message and operation name")]
    MalformedOperation {
        value: String,
        recovered: Box<LogRecord>,
    },
}

impl ParseError {
    /// The partially usable record, if this error carries one
    pub fn into_recovered(self) -> Option<LogRecord> {
        match self {
            Self::Truncated { .. } => None,
            Self::MalformedOperation { recovered, .. } => Some(*recovered),
        }
    }
}

/// Parse one audit log line into a [`LogRecord`].
///
/// # Errors
///
/// - [`ParseError::Truncated`] when the header has fewer than five tokens
/// - [`ParseError::MalformedOperation`] when the last `operation` segment
///   cannot be split; the error still carries the degraded record
///
/// # Examples
///
/// ```
/// use db_audit_tools::audit::parser::parse_line;
///
/// let line = "INFO AuditLog 2021-01-01 12:00:00, SomeClass - host:/10.0.0.1|user:alice";
/// let record = parse_line(line).unwrap();
/// assert_eq!(record.date_time, "2021-01-01 12:00:00");
/// assert_eq!(record.operation.host, "10.0.0.1");
/// assert_eq!(record.operation.user, "alice");
/// ```
pub fn parse_line(line: &str) -> Result<LogRecord, ParseError> {
    let mut tokens = line.split_whitespace();
    let mut header = [""; MIN_FIELDS];
    for (found, slot) in header.iter_mut().enumerate() {
        *slot = tokens.next().ok_or(ParseError::Truncated { found })?;
    }
    let [log_level, stage, date, time, class] = header;

    let mut record = LogRecord {
        log_level: log_level.to_string(),
        stage: stage.to_string(),
        date_time: format!("{} {}", date, time.trim_end_matches(',')),
        class: class.to_string(),
        operation: OperationRecord::default(),
    };

    // Last segment for a key wins, so only the final operation value decides
    let mut malformed = None;
    for segment in line.split('|') {
        let Some((key, value)) = split_segment(segment) else {
            continue;
        };
        let Some(field) = Field::from_key(key) else {
            continue;
        };

        let well_formed = record.operation.set(field, value);
        if field == Field::Operation {
            malformed = (!well_formed).then(|| value.to_string());
        }
    }

    match malformed {
        Some(value) => Err(ParseError::MalformedOperation {
            value,
            recovered: Box::new(record),
        }),
        None => Ok(record),
    }
}

/// Split a pipe segment into `(key, value)`.
///
/// Segments with a restated prefix lose everything before `host:/`.
/// Returns `None` for segments without a `:` or with an empty value.
fn split_segment(segment: &str) -> Option<(&str, &str)> {
    let segment = match segment.find(HOST_MARKER) {
        Some(idx) => &segment[idx + " - ".len()..],
        None => segment,
    };

    let (key, value) = segment.split_once(':')?;
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "INFO AuditLog 2021-01-01 12:00:00,000 SomeClass - host:/127.0.0.1|source:/127.0.0.1|user:alice|authenticated:true|timestamp:1234567890|category:DML|type:QUERY|batch:false|ks:mykeyspace|cf:mytable|operation:SELECT * FROM mytable.select.|consistency level:ONE";

    #[test]
    fn test_parse_sample_line() {
        let record = parse_line(SAMPLE).unwrap();
        assert_eq!(record.log_level, "INFO");
        assert_eq!(record.stage, "AuditLog");
        assert_eq!(record.date_time, "2021-01-01 12:00:00,000");
        assert_eq!(record.class, "SomeClass");

        let op = &record.operation;
        assert_eq!(op.host, "127.0.0.1");
        assert_eq!(op.source, "127.0.0.1");
        assert_eq!(op.user, "alice");
        assert_eq!(op.authenticated, "true");
        assert_eq!(op.timestamp, "1234567890");
        assert_eq!(op.category, "DML");
        assert_eq!(op.kind, "QUERY");
        assert_eq!(op.batch, "false");
        assert_eq!(op.ks, "mykeyspace");
        assert_eq!(op.cf, "mytable");
        assert_eq!(op.operation_message, "SELECT * FROM mytable");
        assert_eq!(op.operation, "select");
        assert_eq!(op.consistency_level, "ONE");
    }

    #[test]
    fn test_trailing_comma_on_time() {
        let line = "INFO AuditLog 2021-01-01 12:00:00, Cls - host:/h|user:bob";
        let record = parse_line(line).unwrap();
        assert_eq!(record.date_time, "2021-01-01 12:00:00");
        assert_eq!(record.class, "Cls");
        assert_eq!(record.operation.user, "bob");
    }

    #[test]
    fn test_truncated_line() {
        let err = parse_line("INFO AuditLog 2021-01-01 12:00:00,").unwrap_err();
        assert_eq!(err, ParseError::Truncated { found: 4 });
        assert!(err.into_recovered().is_none());
    }

    #[test]
    fn test_empty_line_is_truncated() {
        assert_eq!(parse_line("").unwrap_err(), ParseError::Truncated { found: 0 });
        assert_eq!(
            parse_line("   \t ").unwrap_err(),
            ParseError::Truncated { found: 0 }
        );
    }

    #[test]
    fn test_unknown_key_ignored() {
        let line = "INFO AuditLog 2021-01-01 12:00:00, Cls - host:/10.0.0.1|foo:bar|user:carol";
        let record = parse_line(line).unwrap();
        assert_eq!(record.operation.host, "10.0.0.1");
        assert_eq!(record.operation.user, "carol");
        assert_eq!(record.operation.source, "");
    }

    #[test]
    fn test_segment_without_value_ignored() {
        let line = "INFO AuditLog 2021-01-01 12:00:00, Cls - host:/10.0.0.1|user:|user|ks:k1";
        let record = parse_line(line).unwrap();
        assert_eq!(record.operation.user, "");
        assert_eq!(record.operation.ks, "k1");
    }

    #[test]
    fn test_last_key_wins() {
        let line = "INFO AuditLog 2021-01-01 12:00:00, Cls - host:/10.0.0.1|user:first|user:second";
        let record = parse_line(line).unwrap();
        assert_eq!(record.operation.user, "second");
    }

    #[test]
    fn test_restated_prefix_stripped() {
        let line = "INFO AuditLog 2021-01-01 12:00:00, Cls [audit] - host:/1.2.3.4|source:/1.2.3.4|user:dave";
        let record = parse_line(line).unwrap();
        assert_eq!(record.operation.host, "1.2.3.4");
        assert_eq!(record.operation.source, "1.2.3.4");
        assert_eq!(record.operation.user, "dave");
    }

    #[test]
    fn test_value_colons_kept() {
        let line = "INFO AuditLog 2021-01-01 12:00:00, Cls - host:/h|user:svc|timestamp:12:34:56";
        let record = parse_line(line).unwrap();
        assert_eq!(record.operation.timestamp, "12:34:56");
    }

    #[test]
    fn test_malformed_operation_recovered() {
        let line = "INFO AuditLog 2021-01-01 12:00:00, Cls - host:/1.1.1.1|operation:TRUNCATE t|consistency level:ALL";
        let err = parse_line(line).unwrap_err();
        match &err {
            ParseError::MalformedOperation { value, .. } => assert_eq!(value, "TRUNCATE t"),
            other => panic!("unexpected error: {other:?}"),
        }

        let record = err.into_recovered().unwrap();
        assert_eq!(record.operation.host, "1.1.1.1");
        assert_eq!(record.operation.operation_message, "TRUNCATE t");
        assert_eq!(record.operation.operation, "");
        assert_eq!(record.operation.consistency_level, "ALL");
    }

    #[test]
    fn test_later_operation_overrides_malformed() {
        let line = "INFO AuditLog 2021-01-01 12:00:00, Cls - host:/h|operation:bad|operation:SELECT 1.select.";
        let record = parse_line(line).unwrap();
        assert_eq!(record.operation.operation_message, "SELECT 1");
        assert_eq!(record.operation.operation, "select");
    }

    #[test]
    fn test_split_segment() {
        assert_eq!(split_segment("user:alice"), Some(("user", "alice")));
        assert_eq!(
            split_segment("INFO X - host:/10.0.0.1"),
            Some(("host", "/10.0.0.1"))
        );
        assert_eq!(split_segment("a - b - host:/h"), Some(("host", "/h")));
        assert_eq!(split_segment("no separator"), None);
        assert_eq!(split_segment("key:"), None);
    }
}
