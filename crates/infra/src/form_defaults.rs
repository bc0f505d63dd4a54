//! Default-value handling for configuration-backed host form elements.

use serde_json::Value;

/// Resolve the default value a form element should display for a
/// configuration-backed field.
///
/// Stored values may be serialized structures or plain scalars under the
/// same key. Only a string flagged as serialized that actually parses is
/// decoded; everything else passes through unchanged, so a plain scalar
/// default is never misread as structured data.
pub fn configured_default(raw: Value, serialized: bool) -> Value {
    if serialized {
        if let Value::String(text) = &raw {
            if let Ok(decoded) = serde_json::from_str::<Value>(text) {
                return decoded;
            }
        }
    }
    raw
}
