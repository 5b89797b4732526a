//! Output formatting helpers.
//!
//! JSON documents are written tab-indented, one per input line. Counts in
//! the processing summary get thousands separators.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Serialize `value` as a tab-indented JSON document followed by a newline.
///
/// # Examples
///
/// ```
/// use db_audit_tools::utils::format::to_json_document;
///
/// let doc = to_json_document(&serde_json::json!({"user": "alice"})).unwrap();
/// assert_eq!(doc, b"{\n\t\"user\": \"alice\"\n}\n");
/// ```
pub fn to_json_document<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(512);
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Formats a number with comma separators for thousands.
///
/// # Examples
///
/// ```
/// use db_audit_tools::utils::format::format_number;
///
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::types::LogRecord;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(12), "12");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(12_345), "12,345");
        assert_eq!(format_number(123_456), "123,456");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(1_000_000_000), "1,000,000,000");
    }

    #[test]
    fn test_json_document_is_tab_indented() {
        let doc = to_json_document(&LogRecord::default()).unwrap();
        let text = String::from_utf8(doc).unwrap();

        assert!(text.starts_with("{\n\t\"log_level\": \"\",\n"));
        assert!(text.contains("\n\t\t\"host\": \"\",\n"));
        assert!(text.ends_with("}\n"));
        assert!(!text.contains("  \""));
    }
}
