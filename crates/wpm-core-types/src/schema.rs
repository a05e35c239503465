//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Slot and language identifiers
pub const FIELD_SLOT: &str = "slot";
pub const FIELD_SLOT_KIND: &str = "slot_kind";
pub const FIELD_LANG: &str = "lang";

// Write outcome
pub const FIELD_OUTCOME: &str = "outcome";
pub const OUTCOME_MERGED: &str = "merged";
pub const OUTCOME_ALREADY_MULTILINGUAL: &str = "already_multilingual";
pub const OUTCOME_OPAQUE: &str = "opaque";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
