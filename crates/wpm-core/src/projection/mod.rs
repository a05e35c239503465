//! Read-side projection
//!
//! On ordinary reads the host collapses a multilingual flat value to the
//! caller's language. The write pipeline must see the full value instead,
//! so it suspends that projection around its one internal read.

pub mod guard;
pub mod translate;

pub use guard::{with_projection_suspended, ProjectionGuard, ProjectionRegistry};
pub use translate::{translate_value, Fallback};
