use crate::model::MlValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Container kind of a composite in the host's native value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Keyed object; keys are names
    Map,
    /// Array; keys are decimal positions
    List,
}

/// Structural node: ordered key → child
///
/// Array-shaped and object-shaped host values are both held as ordered
/// keyed entries. The shape is kept so the encoder can give the host back
/// the container kind it stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    shape: Shape,
    entries: IndexMap<String, MlValue>,
}

impl Composite {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            entries: IndexMap::new(),
        }
    }

    pub fn map() -> Self {
        Self::new(Shape::Map)
    }

    pub fn list() -> Self {
        Self::new(Shape::List)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn get(&self, key: &str) -> Option<&MlValue> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MlValue) -> Option<MlValue> {
        self.entries.insert(key.into(), value)
    }

    /// Append to a list-shaped composite under the next position key
    pub fn push(&mut self, value: MlValue) {
        let key = self.entries.len().to_string();
        self.entries.insert(key, value);
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: MlValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MlValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &MlValue> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
