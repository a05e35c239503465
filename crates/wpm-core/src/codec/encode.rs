use crate::codec::marker::format_ml_string;
use crate::model::{FlatValue, MlValue, Shape};
use serde_json::{Map, Value};

/// Encode a multilingual tree into the flat value the host persists
///
/// Inverse of [`decode`](crate::codec::decode): `decode(&encode(&t)) == t`
/// for every tree `decode` produces. Unset languages are not written.
///
/// A `Scalar` string that carries the marker is written as-is and reads
/// back as a `LanguageMap`. [`merge`](crate::merge::merge) yields such a
/// scalar only at an `Opaque` position fed marker text.
pub fn encode(tree: &MlValue) -> FlatValue {
    match tree {
        MlValue::Scalar(value) => value.clone(),
        MlValue::LanguageMap(map) => Value::String(format_ml_string(map)),
        MlValue::Composite(composite) => match composite.shape() {
            Shape::List => Value::Array(composite.values().map(encode).collect()),
            Shape::Map => {
                let mut fields = Map::new();
                for (key, child) in composite.iter() {
                    fields.insert(key.to_string(), encode(child));
                }
                Value::Object(fields)
            }
        },
    }
}
