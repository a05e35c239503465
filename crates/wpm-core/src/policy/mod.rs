//! Translation policies
//!
//! A [`Policy`] describes, over the same shape as a flat value, which
//! positions hold per-language text. It is passive data: the merge engine
//! interprets it, nothing here has behavior beyond lookup.
//!
//! # Config-file shape
//!
//! Policies are written in configuration the way host plugins declare them:
//!
//! | Config value            | Policy          |
//! |-------------------------|-----------------|
//! | `null` or `"opaque"`    | `Opaque`        |
//! | `{}`, `[]` or `"leaf"`  | `Leaf`          |
//! | `{"key": <policy>, ..}` | `Recurse`       |
//! | `{"wpm_each": <policy>}`| `Each`          |
//!
//! The string spellings exist because TOML has no `null`.

pub mod registry;

pub use registry::{ContributorInfo, MatchKey, PolicyContext, PolicyContributor, PolicyRegistry};

use crate::errors::{Result, WpmError};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Config key applying one policy to every key of a composite
pub const EACH_KEY: &str = "wpm_each";

static OPAQUE: Policy = Policy::Opaque;

/// Which parts of a value are translated
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Policy {
    /// Translatable text; stored as a language map
    Leaf,
    /// Copied verbatim from every write, never language-split
    #[default]
    Opaque,
    /// Composite; descend per key, unlisted keys are `Opaque`
    Recurse(IndexMap<String, Policy>),
    /// Composite; every key uses the same policy
    Each(Box<Policy>),
}

impl Policy {
    pub fn recurse<K, I>(children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Policy)>,
    {
        Policy::Recurse(children.into_iter().map(|(k, p)| (k.into(), p)).collect())
    }

    pub fn each(child: Policy) -> Self {
        Policy::Each(Box::new(child))
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Policy::Opaque)
    }

    /// Policy governing the child at `key`
    pub fn child(&self, key: &str) -> &Policy {
        match self {
            Policy::Recurse(children) => children.get(key).unwrap_or(&OPAQUE),
            Policy::Each(child) => child,
            Policy::Leaf | Policy::Opaque => &OPAQUE,
        }
    }

    /// Return this policy with `key` set to `child`
    ///
    /// Anything other than `Recurse` is replaced by a `Recurse` holding only
    /// `key`.
    pub fn with_child(self, key: impl Into<String>, child: Policy) -> Self {
        let mut children = match self {
            Policy::Recurse(children) => children,
            Policy::Leaf | Policy::Opaque | Policy::Each(_) => IndexMap::new(),
        };
        children.insert(key.into(), child);
        Policy::Recurse(children)
    }

    /// Interpret a config-file value
    ///
    /// # Errors
    ///
    /// `InvalidPolicy` for values outside the config-file shape, or an
    /// `wpm_each` key mixed with other keys.
    pub fn from_config_value(value: &Value) -> Result<Policy> {
        match value {
            Value::Null => Ok(Policy::Opaque),
            Value::String(s) => match s.as_str() {
                "opaque" => Ok(Policy::Opaque),
                "leaf" => Ok(Policy::Leaf),
                other => Err(WpmError::InvalidPolicy {
                    reason: format!("unknown policy keyword {:?}", other),
                }),
            },
            Value::Array(items) if items.is_empty() => Ok(Policy::Leaf),
            Value::Object(fields) if fields.is_empty() => Ok(Policy::Leaf),
            Value::Object(fields) => {
                if let Some(each) = fields.get(EACH_KEY) {
                    if fields.len() > 1 {
                        return Err(WpmError::InvalidPolicy {
                            reason: format!("`{}` cannot be combined with other keys", EACH_KEY),
                        });
                    }
                    return Ok(Policy::each(Policy::from_config_value(each)?));
                }
                let mut children = IndexMap::new();
                for (key, child) in fields {
                    let child = Policy::from_config_value(child).map_err(|e| match e {
                        WpmError::InvalidPolicy { reason } => WpmError::InvalidPolicy {
                            reason: format!("{}: {}", key, reason),
                        },
                        other => other,
                    })?;
                    children.insert(key.clone(), child);
                }
                Ok(Policy::Recurse(children))
            }
            other => Err(WpmError::InvalidPolicy {
                reason: format!("unsupported policy value {}", other),
            }),
        }
    }

    /// The config-file value for this policy (`null` for `Opaque`)
    pub fn to_config_value(&self) -> Value {
        match self {
            Policy::Opaque => Value::Null,
            Policy::Leaf => Value::Object(Map::new()),
            Policy::Recurse(children) => Value::Object(
                children
                    .iter()
                    .map(|(k, p)| (k.clone(), p.to_config_value()))
                    .collect(),
            ),
            Policy::Each(child) => {
                let mut fields = Map::new();
                fields.insert(EACH_KEY.to_string(), child.to_config_value());
                Value::Object(fields)
            }
        }
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_config_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Policy::from_config_value(&value).map_err(serde::de::Error::custom)
    }
}
