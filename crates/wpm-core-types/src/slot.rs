//! Host storage slot identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of host storage slot a value lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// A site-wide setting
    Option,
    /// A built-in column of a post (title, content, excerpt)
    PostField,
    /// A post meta entry
    PostMeta,
    /// A built-in column of a taxonomy term (name, description)
    TermField,
    /// A term meta entry
    TermMeta,
    /// A custom field managed by a field plugin
    Field,
}

impl SlotKind {
    pub const ALL: [SlotKind; 6] = [
        SlotKind::Option,
        SlotKind::PostField,
        SlotKind::PostMeta,
        SlotKind::TermField,
        SlotKind::TermMeta,
        SlotKind::Field,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Option => "option",
            SlotKind::PostField => "post_field",
            SlotKind::PostMeta => "post_meta",
            SlotKind::TermField => "term_field",
            SlotKind::TermMeta => "term_meta",
            SlotKind::Field => "field",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SlotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown slot kind: {}", s))
    }
}

/// Identity of one persisted value: kind, owning object, field name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId {
    pub kind: SlotKind,
    /// Owning post/term id; `None` for options
    pub object: Option<String>,
    pub field: String,
}

impl SlotId {
    pub fn new(kind: SlotKind, object: Option<String>, field: impl Into<String>) -> Self {
        Self {
            kind,
            object,
            field: field.into(),
        }
    }

    /// A site option slot
    pub fn option(name: impl Into<String>) -> Self {
        Self::new(SlotKind::Option, None, name)
    }

    /// A post meta slot
    pub fn post_meta(post_id: impl ToString, key: impl Into<String>) -> Self {
        Self::new(SlotKind::PostMeta, Some(post_id.to_string()), key)
    }

    /// A term meta slot
    pub fn term_meta(term_id: impl ToString, key: impl Into<String>) -> Self {
        Self::new(SlotKind::TermMeta, Some(term_id.to_string()), key)
    }

    /// A custom field slot attached to an object
    pub fn field(object_id: impl ToString, name: impl Into<String>) -> Self {
        Self::new(SlotKind::Field, Some(object_id.to_string()), name)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.object {
            Some(object) => write!(f, "{}:{}:{}", self.kind, object, self.field),
            None => write!(f, "{}:{}", self.kind, self.field),
        }
    }
}
