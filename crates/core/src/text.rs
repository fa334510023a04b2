//! String helpers: request-body trimming, identifier validation and
//! human-readable id strings.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

/// Characters left unescaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode `input` the way browsers encode a single URI component.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Trim leading and trailing whitespace from every string in `value`,
/// at every depth.
///
/// Numbers, booleans and `null` are left untouched.
pub fn trim_strings(value: &mut Value) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(trim_strings),
        Value::Object(fields) => fields.values_mut().for_each(trim_strings),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Whether `value` is an acceptable entity identifier: any JSON integer,
/// positive, negative or zero.
pub fn is_valid_id(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        _ => false,
    }
}

/// Build a URL-friendly identifier such as `test-event-0` from a display
/// name and a numeric id.
pub fn generate_id_string(name: &str, id: i64) -> String {
    let slug = name.to_lowercase().replace(' ', "-");
    format!("{}-{id}", encode_uri_component(&slug))
}
