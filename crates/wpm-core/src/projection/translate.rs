use crate::codec::parse_ml_string;
use crate::model::FlatValue;
use serde_json::Value;
use wpm_core_types::LangCode;

/// What a projected read yields when the requested language is unset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Use this language's text, or the empty string if it is unset too
    Language(LangCode),
    /// Yield the empty string
    Empty,
}

/// Collapse every multilingual string in `flat` to one language
///
/// Strings that do not carry the marker, and all non-string scalars, are
/// returned unchanged. Container shape and key order are kept.
pub fn translate_value(flat: &FlatValue, lang: &LangCode, fallback: &Fallback) -> FlatValue {
    match flat {
        Value::String(s) => match parse_ml_string(s) {
            Some(map) => {
                let text = map.get(lang).or_else(|| match fallback {
                    Fallback::Language(default) => map.get(default),
                    Fallback::Empty => None,
                });
                Value::String(text.unwrap_or_default().to_string())
            }
            None => flat.clone(),
        },
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| translate_value(item, lang, fallback))
                .collect(),
        ),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), translate_value(v, lang, fallback)))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) => flat.clone(),
    }
}
