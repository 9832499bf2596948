//! Record-to-text conversion and the separator framing that delimits
//! records inside a log file.

use crate::errors::SerializationError;
use crate::record::LogRecord;

/// The token written between consecutive records.
///
/// Unique enough that it cannot collide with user content, which lets a
/// reader split a file back into individual records.
pub const SEPARATOR: &str =
    "<!--###############-f2781505-f286-4c9d-b73d-fa78eae22723-###############-->";

const BLANK: &str = "\r\n\r\n";

/// Serializes a record into self-describing text.
///
/// The output is pretty-printed JSON: field names and values are
/// recoverable without an external schema, and field order follows the
/// struct declaration, so the text of a given record is deterministic.
pub(crate) fn to_text<R: LogRecord>(record: &R) -> Result<String, SerializationError> {
    serde_json::to_string_pretty(record)
        .map_err(|e| SerializationError::new(R::TYPE_NAME, e))
}

/// Frames one serialized record for appending: the text, a blank line, the
/// separator, and another blank line. Every record gets the full frame,
/// including the last one of a batch.
pub(crate) fn block(text: &str) -> String {
    format!("{}{}{}{}", text, BLANK, SEPARATOR, BLANK)
}

/// Splits log file content back into record texts.
///
/// The inverse of the framing done on the write path; used by the dump tool
/// and by tests. Surrounding blank lines are stripped and empty fragments
/// (e.g. after the trailing separator) are dropped.
pub fn split_blocks(content: &str) -> Vec<&str> {
    content
        .split(SEPARATOR)
        .map(|s| s.trim_matches(|c| c == '\r' || c == '\n'))
        .filter(|s| !s.is_empty())
        .collect()
}
