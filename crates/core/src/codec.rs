//! Flat-string codecs used by the REST API for collection-valued fields.

use std::collections::BTreeMap;

pub const TAG_SEPARATOR: &str = ",";
pub const HEADER_SEPARATOR: &str = ": ";

// ── Comma-separated lists ───────────────────────────────────────────

/// Split a comma-separated string, trimming each element and keeping order.
///
/// An empty input yields a single empty element; the REST format depends on it.
pub fn decode_comma_list(value: &str) -> Vec<String> {
    value
        .split(TAG_SEPARATOR)
        .map(|part| part.trim().to_string())
        .collect()
}

/// Join elements with "," and no padding.
pub fn encode_comma_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR)
}

// ── "Key: Value" header lists ───────────────────────────────────────

/// Decode `"Key: Value"` entries into a map.
///
/// Splits at the first `:` only so values may contain colons. An entry without
/// a colon maps its trimmed text to an empty value.
pub fn decode_header_list<S: AsRef<str>>(headers: &[S]) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|h| match h.as_ref().split_once(':') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (h.as_ref().trim().to_string(), String::new()),
        })
        .collect()
}

/// Encode a header map as `"Key: Value"` entries.
pub fn encode_header_list(headers: &BTreeMap<String, String>) -> Vec<String> {
    headers
        .iter()
        .map(|(key, value)| format!("{key}{HEADER_SEPARATOR}{value}"))
        .collect()
}
