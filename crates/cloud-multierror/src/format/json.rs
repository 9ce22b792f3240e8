//! JSON rendering: `{"errors": [...]}`.

use serde_json::{json, Value};

use crate::Entry;

/// Render entries as a pretty-printed JSON document.
///
/// Every element of the `errors` array is the entry's structured fields when
/// it has them (see [`Structured`](crate::Structured)), otherwise
/// `{"message": "<error text>"}`. Mixed lists are rendered element by element.
///
/// # Examples
///
/// ```
/// use cloud_multierror::{json_format, Prefixed};
///
/// let errors = Prefixed::with_errors("cfg", ["a", "b"]);
/// let doc: serde_json::Value = serde_json::from_str(&json_format(errors.entries())).unwrap();
/// assert_eq!(doc["errors"][0]["message"], "a");
/// assert_eq!(doc["errors"][1]["message"], "b");
/// ```
#[must_use]
pub fn json_format(entries: &[Entry]) -> String {
    let errors: Vec<Value> = entries.iter().map(entry_value).collect();
    let doc = json!({ "errors": errors });

    serde_json::to_string_pretty(&doc).unwrap_or_else(|err| {
        tracing::warn!(%err, "pretty JSON rendering failed, using compact output");
        doc.to_string()
    })
}

fn entry_value(entry: &Entry) -> Value {
    match entry.fields() {
        Some(fields) => Value::Object(fields.clone()),
        None => json!({ "message": entry.message() }),
    }
}
