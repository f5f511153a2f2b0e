//! Payload codec — the boundary between an in-memory JSON value and the
//! JSON text kept in the store's `data` column.

use serde_json::Value;

/// Encode a payload into its stored text form.
#[must_use]
pub fn encode(value: &Value) -> String {
    value.to_string()
}

/// Decode stored text back into a payload.
///
/// # Errors
///
/// Returns the parser error when `text` is not valid JSON.
pub fn decode(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Decode stored text, substituting [`Value::Null`] for anything unparseable.
///
/// Returns the parser error alongside so callers can report it.
#[must_use]
pub fn decode_or_null(text: &str) -> (Value, Option<serde_json::Error>) {
    match decode(text) {
        Ok(value) => (value, None),
        Err(err) => (Value::Null, Some(err)),
    }
}
