//! Multilingual value codec
//!
//! A translatable leaf is stored in the host slot as one string:
//!
//! ```text
//! [:en]Hello[:fr]Bonjour[:]
//! ```
//!
//! Each language segment opens with `[:code]`; the string closes with the
//! terminator `[:]`. Inside a segment every `[:` is written as `[::`, which
//! can never start a tag, so arbitrary text survives a round trip.
//!
//! ## Entry points
//!
//! - [`is_multilingual`] - does a flat value already carry the marker?
//! - [`decode`] - flat value to [`MlValue`](crate::model::MlValue), never fails
//! - [`encode`] - tree back to the flat value the host persists
//!
//! Detection and decoding share one parser, so they always agree on what
//! counts as multilingual.

pub mod decode;
pub mod encode;
pub mod marker;

pub use decode::{decode, is_multilingual};
pub use encode::encode;
pub use marker::{format_ml_string, parse_ml_string};
