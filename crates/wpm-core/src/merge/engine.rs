use crate::model::{Composite, FlatValue, LanguageMap, MlValue, Shape};
use crate::policy::Policy;
use serde_json::Value;
use wpm_core_types::LangCode;

/// Merge `new_flat`, written under `active`, into `old`
///
/// - `Opaque` positions mirror the new value and drop any language data.
/// - `Leaf` positions holding a string update `active`'s entry only, even
///   when the text itself looks like an encoded value.
/// - `Recurse`/`Each` positions iterate the new value's keys and pair them
///   with `old`'s children by key, never by position.
///
/// A position where `old` does not have the shape the policy expects is
/// merged as if `old` were absent there.
///
/// `decode(encode(t)) == t` holds for the result except at `Opaque`
/// positions whose new value is a string carrying the marker: that string
/// stays a `Scalar` here but decodes back as a `LanguageMap`. The write
/// pipeline never merges such values, since already multilingual writes
/// are passed through before merging.
pub fn merge(old: &MlValue, new_flat: &FlatValue, active: &LangCode, policy: &Policy) -> MlValue {
    merge_at(Some(old), new_flat, active, policy)
}

fn merge_at(
    old: Option<&MlValue>,
    new_flat: &FlatValue,
    active: &LangCode,
    policy: &Policy,
) -> MlValue {
    match (policy, new_flat) {
        (Policy::Opaque, _) => {
            if old.is_some_and(MlValue::has_language_maps) {
                tracing::trace!("opaque position discards language data");
            }
            verbatim(new_flat)
        }
        (_, Value::String(text)) => merge_text(old, text, active),
        (Policy::Leaf, _) => verbatim(new_flat),
        (Policy::Recurse(_) | Policy::Each(_), Value::Array(items)) => {
            let old = old.and_then(MlValue::as_composite);
            let mut composite = Composite::new(Shape::List);
            for (index, item) in items.iter().enumerate() {
                let key = index.to_string();
                let old_child = old.and_then(|c| c.get(&key));
                composite.insert(key.clone(), merge_at(old_child, item, active, policy.child(&key)));
            }
            MlValue::Composite(composite)
        }
        (Policy::Recurse(_) | Policy::Each(_), Value::Object(fields)) => {
            let old = old.and_then(MlValue::as_composite);
            let mut composite = Composite::new(Shape::Map);
            for (key, item) in fields {
                let old_child = old.and_then(|c| c.get(key));
                composite.insert(key.clone(), merge_at(old_child, item, active, policy.child(key)));
            }
            MlValue::Composite(composite)
        }
        (Policy::Recurse(_) | Policy::Each(_), _) => verbatim(new_flat),
    }
}

/// Language-map update at a translatable position
fn merge_text(old: Option<&MlValue>, text: &str, active: &LangCode) -> MlValue {
    let mut map = match old.and_then(MlValue::as_language_map) {
        Some(existing) => existing.clone(),
        None => LanguageMap::new(),
    };

    map.set(active.clone(), text);

    MlValue::LanguageMap(map)
}

/// Mirror a flat value with no language splitting
///
/// Strings stay `Scalar` even when they carry the marker.
pub fn verbatim(flat: &FlatValue) -> MlValue {
    match flat {
        Value::Array(items) => {
            let mut composite = Composite::new(Shape::List);
            for item in items {
                composite.push(verbatim(item));
            }
            MlValue::Composite(composite)
        }
        Value::Object(fields) => {
            let mut composite = Composite::new(Shape::Map);
            for (key, item) in fields {
                composite.insert(key.clone(), verbatim(item));
            }
            MlValue::Composite(composite)
        }
        other => MlValue::Scalar(other.clone()),
    }
}
