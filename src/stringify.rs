//! Literal value stringification.
//!
//! Comparison values always travel as bind parameters, never spliced into the
//! SQL text. This module renders them as strict JSON text; whether the path
//! side is unquoted (and therefore compared against the raw string instead)
//! is the dialect compiler's decision, not this module's.
//!
//! Output is deterministic: `serde_json` keeps object keys sorted, so the
//! same composite literal always encodes to the same text.

use serde_json::Value;

/// Encode a literal as strict JSON text.
///
/// Nulls nested inside a composite literal render as the JSON text `null`
/// here regardless of the global null mode; the mode only governs top-level
/// operands and is resolved before stringification.
pub fn to_json_text(value: &Value) -> String {
    value.to_string()
}

/// The raw text view of a string literal, used when an unquoting extraction
/// leaves a bare-string comparison. Non-strings have no raw form.
pub fn raw_text(value: &Value) -> Option<&str> {
    value.as_str()
}

/// JSON text or, for strings, the raw unquoted form.
pub fn unquoted_text(value: &Value) -> String {
    match raw_text(value) {
        Some(s) => s.to_string(),
        None => to_json_text(value),
    }
}

/// True for values that extract as documents rather than scalars.
pub fn is_composite(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// The bound text for a JSON `null` comparison.
pub fn json_null_text() -> &'static str {
    "null"
}
