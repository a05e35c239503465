//! WPM Core - multilingual value codec and merge engine
//!
//! A content host stores one value per slot (a setting, a meta entry, a
//! field). This crate lets that one slot carry a variant per language:
//!
//! - [`codec`]: detect, decode and encode the multilingual marker format
//! - [`merge`]: fold a single-language edit into a stored tree
//! - [`policy`]: which positions of a value are translatable
//! - [`projection`]: the read-side language filter and its suspension guard
//! - [`intercept`]: the write pipeline tying the above together
//! - [`config`]: languages and base policies from TOML or JSON
//!
//! ```
//! use serde_json::json;
//! use wpm_core::{decode, encode, merge, LangCode, Policy};
//!
//! let en = LangCode::new("en").unwrap();
//! let old = decode(&json!("[:en]Hello[:fr]Bonjour[:]"));
//! let merged = merge(&old, &json!("Hi"), &en, &Policy::Leaf);
//! assert_eq!(encode(&merged), json!("[:en]Hi[:fr]Bonjour[:]"));
//! ```

pub mod codec;
pub mod config;
pub mod errors;
pub mod intercept;
pub mod logging_facility;
pub mod merge;
pub mod model;
pub mod policy;
pub mod projection;

pub use wpm_core_types as types;

#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use codec::{decode, encode, is_multilingual};
pub use config::EngineConfig;
pub use errors::{ExError, ExErrorKind, Result, WpmError};
pub use intercept::{LanguageContext, SlotStore, StaticLanguages, WriteInterceptor, WriteOutcome};
pub use merge::merge;
pub use model::{Composite, FlatValue, LanguageMap, MlValue, Shape};
pub use policy::{Policy, PolicyRegistry};
pub use projection::{translate_value, with_projection_suspended, Fallback, ProjectionRegistry};
pub use wpm_core_types::{LangCode, LanguageSet, SlotId, SlotKind};
