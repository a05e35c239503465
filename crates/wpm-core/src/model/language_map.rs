use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use wpm_core_types::LangCode;

/// Per-language text for one translatable leaf
///
/// Entries keep insertion order, which is also the order the encoder writes
/// them in. A language without an entry is unset, which is distinct from an
/// entry holding the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageMap {
    entries: IndexMap<LangCode, String>,
}

impl LanguageMap {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// A map holding a single language entry
    pub fn single(lang: LangCode, text: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.set(lang, text);
        map
    }

    pub fn get(&self, lang: &LangCode) -> Option<&str> {
        self.entries.get(lang).map(String::as_str)
    }

    /// Set one language's text, returning the previous text if any
    ///
    /// An existing entry keeps its position; a new one is appended.
    pub fn set(&mut self, lang: LangCode, text: impl Into<String>) -> Option<String> {
        self.entries.insert(lang, text.into())
    }

    pub fn contains(&self, lang: &LangCode) -> bool {
        self.entries.contains_key(lang)
    }

    pub fn languages(&self) -> impl Iterator<Item = &LangCode> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LangCode, &str)> {
        self.entries.iter().map(|(lang, text)| (lang, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(LangCode, String)> for LanguageMap {
    fn from_iter<T: IntoIterator<Item = (LangCode, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LanguageMap {
    type Item = (LangCode, String);
    type IntoIter = indexmap::map::IntoIter<LangCode, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
