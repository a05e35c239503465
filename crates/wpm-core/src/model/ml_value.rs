use crate::model::{Composite, LanguageMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wpm_core_types::LangCode;

/// Decoded, language-aware form of a flat value
///
/// Trees are built fresh from a flat value for one decode/merge/encode
/// cycle and discarded afterwards.
///
/// A `LanguageMap` never holds another `LanguageMap`: per-language values
/// are plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MlValue {
    /// Non-multilingual leaf (string, number, bool or null), copied as-is
    Scalar(Value),
    /// Translatable leaf
    LanguageMap(LanguageMap),
    /// Structural node
    Composite(Composite),
}

impl MlValue {
    /// Convenience constructor for a `Scalar` string
    pub fn text(s: impl Into<String>) -> Self {
        MlValue::Scalar(Value::String(s.into()))
    }

    pub fn is_language_map(&self) -> bool {
        matches!(self, MlValue::LanguageMap(_))
    }

    pub fn as_language_map(&self) -> Option<&LanguageMap> {
        match self {
            MlValue::LanguageMap(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            MlValue::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            MlValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Child of a composite by key; `None` for leaves
    pub fn child(&self, key: &str) -> Option<&MlValue> {
        self.as_composite().and_then(|c| c.get(key))
    }

    /// Text stored for `lang`, if this is a language map holding it
    pub fn text_for(&self, lang: &LangCode) -> Option<&str> {
        self.as_language_map().and_then(|m| m.get(lang))
    }

    /// Whether any language map exists at or below this node
    pub fn has_language_maps(&self) -> bool {
        match self {
            MlValue::Scalar(_) => false,
            MlValue::LanguageMap(_) => true,
            MlValue::Composite(c) => c.values().any(MlValue::has_language_maps),
        }
    }
}

impl From<LanguageMap> for MlValue {
    fn from(map: LanguageMap) -> Self {
        MlValue::LanguageMap(map)
    }
}

impl From<Composite> for MlValue {
    fn from(composite: Composite) -> Self {
        MlValue::Composite(composite)
    }
}
