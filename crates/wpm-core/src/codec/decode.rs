use crate::codec::marker::{parse_ml_string, TAG_OPEN};
use crate::model::{Composite, FlatValue, MlValue, Shape};
use serde_json::Value;

/// Whether a flat value already carries the multilingual marker
///
/// A string qualifies only if it parses as a complete marker string. A
/// composite qualifies if any string beneath it does. Legacy single-language
/// data is never reported as multilingual.
pub fn is_multilingual(flat: &FlatValue) -> bool {
    match flat {
        Value::String(s) => parse_ml_string(s).is_some(),
        Value::Array(items) => items.iter().any(is_multilingual),
        Value::Object(fields) => fields.values().any(is_multilingual),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Decode a flat value into a multilingual tree
///
/// Purely structural: no policy is consulted. Marker strings become
/// `LanguageMap`, arrays and objects become `Composite`, everything else
/// (including strings that only look like markers) is a `Scalar`.
pub fn decode(flat: &FlatValue) -> MlValue {
    match flat {
        Value::String(s) => match parse_ml_string(s) {
            Some(map) => MlValue::LanguageMap(map),
            None => {
                if s.starts_with(TAG_OPEN) {
                    tracing::debug!(len = s.len(), "marker-like string kept as scalar");
                }
                MlValue::Scalar(flat.clone())
            }
        },
        Value::Array(items) => {
            let mut composite = Composite::new(Shape::List);
            for item in items {
                composite.push(decode(item));
            }
            MlValue::Composite(composite)
        }
        Value::Object(fields) => {
            let mut composite = Composite::new(Shape::Map);
            for (key, item) in fields {
                composite.insert(key.clone(), decode(item));
            }
            MlValue::Composite(composite)
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => MlValue::Scalar(flat.clone()),
    }
}
