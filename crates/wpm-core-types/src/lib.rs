//! Core types shared across the multilingual engine crates
//!
//! This crate provides foundational types used by the codec, the merge
//! engine and the logging facility:
//!
//! - **Languages**: LangCode, LanguageSet
//! - **Slots**: SlotKind, SlotId identifying one host storage slot
//! - **Schema constants**: Canonical field keys and event names

pub mod lang;
pub mod schema;
pub mod slot;

pub use lang::{InvalidLangCode, LangCode, LanguageSet, LANG_CODE_PATTERN};
pub use slot::{SlotId, SlotKind};
