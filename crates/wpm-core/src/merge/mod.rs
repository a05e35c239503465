//! Merge engine
//!
//! Folds one single-language edit into a previously stored multilingual
//! tree. The policy says where translatable text lives; the new value's
//! structure says which keys exist now.

pub mod engine;

pub use engine::{merge, verbatim};
