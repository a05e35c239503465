#![allow(clippy::unwrap_used, clippy::expect_used)]

use wpm_core::errors::{ExError, ExErrorKind, WpmError};
use wpm_core::logging_facility::test_capture::init_test_capture;
use wpm_core::{log_op_end, log_op_error, log_op_start};
use wpm_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert!(start_events > 0, "Should have captured at least one start event");
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code_and_kind() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = WpmError::SlotRead {
        slot: "option:blogname".to_string(),
        message: "timeout".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_SLOT_READ"));
    assert_eq!(error_events[0].field("err.kind"), Some("SlotRead"));
    assert_eq!(error_events[0].field("fatal"), Some("false"));
}

#[test]
fn test_fatal_error_is_flagged() {
    let capture = init_test_capture();
    let op_name = "test_fatal_error_unique_4";

    let err = WpmError::GuardRestoreFailed {
        slot: "option:blogname".to_string(),
        reason: "depth mismatch".to_string(),
    };
    let ex_err: ExError = err.clone().into();
    assert_eq!(ex_err.kind(), ExErrorKind::GuardRestoreFailed);

    log_op_error!(op_name, err, duration_ms = 1);

    let event = capture
        .events_for(op_name)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(event.field("fatal"), Some("true"));
    assert_eq!(event.field(FIELD_ERR_CODE), Some("ERR_GUARD_RESTORE_FAILED"));
}

#[test]
fn test_boundary_ownership_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_ownership_unique_5";

    log_op_start!(op_name, slot = "option:blogname");
    log_op_end!(op_name, duration_ms = 42);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END)
    });

    assert_eq!(starts, 1, "Should have exactly one start event");
    assert_eq!(ends, 1, "Should have exactly one end event");
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_6";

    log_op_start!(op_name, slot = "post_meta:7:_title", lang = "fr");

    let start_event = capture
        .events_for(op_name)
        .into_iter()
        .next()
        .expect("Should have start event");

    assert_eq!(start_event.field("slot"), Some("post_meta:7:_title"));
    assert_eq!(start_event.field("lang"), Some("fr"));
    assert!(start_event.field("component").is_some());
}

#[test]
fn test_test_capture_assert_event_exists() {
    let capture = init_test_capture();
    let op_name = "test_capture_assert_unique_7";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}
