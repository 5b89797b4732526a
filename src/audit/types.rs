//! Data structures for converted audit log records.
//!
//! One [`LogRecord`] is built per input line. The positional header fields
//! live at the top level and every pipe-delimited attribute lands in the
//! nested [`OperationRecord`].

use serde::{Deserialize, Serialize};

/// A single converted audit log line.
///
/// # Fields
///
/// - `log_level`: First whitespace-delimited token (e.g. "INFO")
/// - `stage`: Second token, usually the logger name
/// - `date_time`: Date and time tokens joined by a space, trailing comma removed
/// - `class`: Fifth token, the emitting class
/// - `operation`: Attributes taken from the `key:value` pipe segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogRecord {
    pub log_level: String,
    pub stage: String,
    pub date_time: String,
    pub class: String,
    pub operation: OperationRecord,
}

/// Attributes of the audited operation.
///
/// Missing attributes serialize as empty strings so every document has the
/// same set of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OperationRecord {
    /// Server address with the leading `/` removed
    pub host: String,
    /// Client address with leading `/` removed
    pub source: String,
    pub user: String,
    pub authenticated: String,
    pub timestamp: String,
    /// Statement category (e.g. "DML", "DDL", "AUTH")
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub batch: String,
    /// Keyspace
    pub ks: String,
    /// Column family
    pub cf: String,
    /// Statement text from the compound `operation` attribute
    pub operation_message: String,
    /// Operation name from the compound `operation` attribute
    pub operation: String,
    pub consistency_level: String,
}

/// Known pipe-segment keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Host,
    Source,
    User,
    Authenticated,
    Timestamp,
    Category,
    Type,
    Batch,
    Keyspace,
    ColumnFamily,
    Operation,
    ConsistencyLevel,
}

impl Field {
    /// Look up a segment key exactly as it appears in the log.
    ///
    /// Unknown keys return `None` and are meant to be ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        let field = match key {
            "host" => Self::Host,
            "source" => Self::Source,
            "user" => Self::User,
            "authenticated" => Self::Authenticated,
            "timestamp" => Self::Timestamp,
            "category" => Self::Category,
            "type" => Self::Type,
            "batch" => Self::Batch,
            "ks" => Self::Keyspace,
            "cf" => Self::ColumnFamily,
            "operation" => Self::Operation,
            "consistency level" => Self::ConsistencyLevel,
            _ => return None,
        };
        Some(field)
    }
}

impl OperationRecord {
    /// Store `value` under `field`, applying the per-field transforms.
    ///
    /// Returns `false` only when an `operation` value could not be split into
    /// message and name; the whole value is then kept as the message.
    pub fn set(&mut self, field: Field, value: &str) -> bool {
        match field {
            Field::Host => self.host = value.strip_prefix('/').unwrap_or(value).to_string(),
            Field::Source => self.source = value.trim_start_matches('/').to_string(),
            Field::User => self.user = value.to_string(),
            Field::Authenticated => self.authenticated = value.to_string(),
            Field::Timestamp => self.timestamp = value.to_string(),
            Field::Category => self.category = value.to_string(),
            Field::Type => self.kind = value.to_string(),
            Field::Batch => self.batch = value.to_string(),
            Field::Keyspace => self.ks = value.to_string(),
            Field::ColumnFamily => self.cf = value.to_string(),
            Field::ConsistencyLevel => self.consistency_level = value.to_string(),
            Field::Operation => return self.set_operation(value),
        }
        true
    }

    fn set_operation(&mut self, value: &str) -> bool {
        match split_operation(value) {
            Some((message, name)) => {
                self.operation_message = message.to_string();
                self.operation = name.to_string();
                true
            }
            None => {
                self.operation_message = value.to_string();
                self.operation.clear();
                false
            }
        }
    }
}

/// Split a compound `"<message>.<name>."` value.
///
/// Trailing dots are dropped first, then the split happens at the last
/// remaining dot so statements like `FROM ks.tbl` keep their qualifier.
fn split_operation(value: &str) -> Option<(&str, &str)> {
    let body = value.trim_end_matches('.');
    let idx = body.rfind('.')?;

    let message = body[..idx].trim_end_matches('.');
    let name = &body[idx + 1..];
    let name = name.strip_prefix(' ').unwrap_or(name).trim_start_matches('.');

    Some((message, name))
}

/// Flat view of a [`LogRecord`], matching the older single-level schema.
#[derive(Debug, Serialize)]
pub struct FlatLogRecord<'a> {
    pub log_level: &'a str,
    pub stage: &'a str,
    pub date_time: &'a str,
    pub class: &'a str,
    #[serde(flatten)]
    pub operation: &'a OperationRecord,
}

impl LogRecord {
    /// Borrow this record in the flat output shape
    pub fn flatten(&self) -> FlatLogRecord<'_> {
        FlatLogRecord {
            log_level: &self.log_level,
            stage: &self.stage,
            date_time: &self.date_time,
            class: &self.class,
            operation: &self.operation,
        }
    }
}
