//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! ```rust
//! use wpm_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Only entry points (the write pipeline) emit start/end events. The codec
//! and merge engine log at `debug`/`trace` only.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
