pub mod composite;
pub mod language_map;
pub mod ml_value;

pub use composite::{Composite, Shape};
pub use language_map::LanguageMap;
pub use ml_value::MlValue;

/// The host's native single-slot value: a string, scalar, or nested array/object
pub type FlatValue = serde_json::Value;
