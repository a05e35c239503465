//! Write pipeline scenarios
//!
//! The host-facing flow: policy resolution, the guarded read of the stored
//! value, and the structured events each write emits.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use wpm_core::errors::WpmError;
use wpm_core::logging_facility::test_capture::init_test_capture;
use wpm_core::policy::{MatchKey, PolicyContext};
use wpm_core::{
    EngineConfig, Fallback, LangCode, LanguageSet, Policy, PolicyRegistry, ProjectionRegistry,
    Result, SlotId, SlotKind, SlotStore, StaticLanguages, WriteInterceptor, WriteOutcome,
};
use wpm_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE, FIELD_OUTCOME};

fn code(s: &str) -> LangCode {
    LangCode::new(s).expect("valid language code")
}

fn en_fr(active: &str) -> StaticLanguages {
    StaticLanguages::new(code(active), LanguageSet::new(code("en"), [code("en"), code("fr")]))
}

/// Host storage whose ordinary read path goes through the projection filter
struct ProjectingStore<'a> {
    values: HashMap<SlotId, Value>,
    projection: &'a ProjectionRegistry,
    reader_lang: LangCode,
    observed: RefCell<Vec<Value>>,
}

impl<'a> ProjectingStore<'a> {
    fn new(projection: &'a ProjectionRegistry, reader_lang: LangCode) -> Self {
        Self {
            values: HashMap::new(),
            projection,
            reader_lang,
            observed: RefCell::new(Vec::new()),
        }
    }

    /// Read the way any other code in the host would
    fn host_read(&self, slot: &SlotId) -> Result<Value> {
        let raw = self.values.get(slot).cloned().unwrap_or(Value::Null);
        self.projection
            .read(slot, &raw, &self.reader_lang, &Fallback::Empty)
    }
}

impl SlotStore for ProjectingStore<'_> {
    fn read_raw(&self, slot: &SlotId) -> Result<Value> {
        let seen = self.host_read(slot)?;
        self.observed.borrow_mut().push(seen.clone());
        Ok(seen)
    }
}

struct BrokenStore;

impl SlotStore for BrokenStore {
    fn read_raw(&self, slot: &SlotId) -> Result<Value> {
        Err(WpmError::SlotRead {
            slot: slot.to_string(),
            message: "storage unavailable".to_string(),
        })
    }
}

#[test]
fn test_scenario_05_guarded_read_sees_unprojected_value() {
    // GIVEN a translated option whose reads are projected to French
    let projection = ProjectionRegistry::new();
    let slot = SlotId::option("blogdescription");
    projection.register(&slot).unwrap();

    let mut store = ProjectingStore::new(&projection, code("fr"));
    store
        .values
        .insert(slot.clone(), json!("[:en]Just a blog[:fr]Juste un blog[:]"));

    let mut policies = PolicyRegistry::new();
    policies.set_base(SlotKind::Option, "blogdescription", Policy::Leaf);
    let languages = en_fr("en");

    // AND an ordinary read outside the pipeline is projected
    assert_eq!(store.host_read(&slot).unwrap(), json!("Juste un blog"));

    // WHEN an English edit is intercepted
    let interceptor = WriteInterceptor::new(&store, &languages, &policies, &projection);
    let written = interceptor
        .intercept_write(&slot, json!("Another blog"))
        .unwrap();

    // THEN the pipeline's own read saw the full multilingual value
    assert_eq!(
        store.observed.borrow().as_slice(),
        &[json!("[:en]Just a blog[:fr]Juste un blog[:]")]
    );

    // AND the French text was preserved
    assert_eq!(written, json!("[:en]Another blog[:fr]Juste un blog[:]"));

    // AND projection is registered again once the write returns
    assert!(projection.is_registered(&slot).unwrap());
    assert_eq!(projection.suspended_depth(&slot).unwrap(), 0);
    assert_eq!(store.host_read(&slot).unwrap(), json!("Juste un blog"));
}

#[test]
fn test_failed_read_restores_projection() {
    // GIVEN a registered slot whose storage fails
    let projection = ProjectionRegistry::new();
    let slot = SlotId::option("pipeline_broken");
    projection.register(&slot).unwrap();
    let mut policies = PolicyRegistry::new();
    policies.set_base(SlotKind::Option, "pipeline_broken", Policy::Leaf);
    let languages = en_fr("en");

    // WHEN a write is intercepted
    let interceptor = WriteInterceptor::new(&BrokenStore, &languages, &policies, &projection);
    let result = interceptor.intercept_write(&slot, json!("x"));

    // THEN the read error is surfaced and projection is registered again
    assert!(matches!(result, Err(WpmError::SlotRead { .. })));
    assert!(projection.is_registered(&slot).unwrap());
}

#[test]
fn test_config_driven_post_meta_write() {
    // GIVEN a config translating a structured post meta entry
    let config = EngineConfig::from_toml_str(
        r#"
[languages]
default = "en"
known = ["en", "uk"]

[post_meta]
_gallery = { caption = "leaf", items = { wpm_each = { alt = "leaf" } } }
"#,
    )
    .unwrap();
    let slot = SlotId::post_meta(42, "_gallery");
    let mut store = HashMap::new();
    store.insert(
        slot.clone(),
        json!({
            "caption": "[:en]Summer[:uk]Літо[:]",
            "items": [{"alt": "[:en]Beach[:uk]Пляж[:]", "id": 7}]
        }),
    );
    let policies = config.policy_registry();
    let projection = ProjectionRegistry::new();
    let languages = StaticLanguages::new(code("uk"), config.language_set());

    // WHEN the Ukrainian editor saves new captions
    let interceptor = WriteInterceptor::new(&store, &languages, &policies, &projection);
    let written = interceptor
        .intercept(
            &slot,
            json!({"caption": "Літо 2024", "items": [{"alt": "Пляж", "id": 8}]}),
        )
        .unwrap();

    // THEN English texts are kept and the opaque id is replaced
    assert_eq!(written.outcome, WriteOutcome::Merged);
    assert_eq!(
        written.value,
        json!({
            "caption": "[:en]Summer[:uk]Літо 2024[:]",
            "items": [{"alt": "[:en]Beach[:uk]Пляж[:]", "id": 8}]
        })
    );
}

#[test]
fn test_contributor_extends_configured_policy() {
    // GIVEN an option with no configured policy and a contributor for it
    let slot = SlotId::option("seo_options");
    let mut store = HashMap::new();
    store.insert(slot.clone(), json!({"home_title": "[:fr]Accueil[:]", "noindex": true}));
    let mut policies = PolicyRegistry::new();
    policies.register(
        "seo-plugin",
        MatchKey::field(SlotKind::Option, "seo_options"),
        10,
        |_: &PolicyContext<'_>, p: Policy| p.with_child("home_title", Policy::Leaf),
    );
    let projection = ProjectionRegistry::new();
    let languages = en_fr("en");

    // WHEN an English edit is intercepted
    let interceptor = WriteInterceptor::new(&store, &languages, &policies, &projection);
    let written = interceptor
        .intercept_write(&slot, json!({"home_title": "Home", "noindex": false}))
        .unwrap();

    // THEN the contributed leaf is merged and the rest copied
    assert_eq!(
        written,
        json!({"home_title": "[:fr]Accueil[:en]Home[:]", "noindex": false})
    );
}

#[test]
fn test_write_emits_start_and_end_events() {
    let capture = init_test_capture();
    let slot = SlotId::option("log_pipeline_merged");
    let store: HashMap<SlotId, Value> = HashMap::new();
    let mut policies = PolicyRegistry::new();
    policies.set_base(SlotKind::Option, "log_pipeline_merged", Policy::Leaf);
    let projection = ProjectionRegistry::new();
    let languages = en_fr("en");

    WriteInterceptor::new(&store, &languages, &policies, &projection)
        .intercept_write(&slot, json!("x"))
        .unwrap();

    let events = capture.events_with_field("slot", "option:log_pipeline_merged");
    let starts = events
        .iter()
        .filter(|e| e.op.as_deref() == Some("intercept_write") && e.event.as_deref() == Some(EVENT_START))
        .count();
    let ends: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some("intercept_write") && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(starts, 1, "Should have exactly one start event");
    assert_eq!(ends.len(), 1, "Should have exactly one end event");
    assert_eq!(ends[0].field(FIELD_OUTCOME), Some("merged"));
    assert!(ends[0].field("duration_ms").is_some());
}

#[test]
fn test_passthrough_outcome_is_logged() {
    let capture = init_test_capture();
    let slot = SlotId::option("log_pipeline_opaque");
    let store: HashMap<SlotId, Value> = HashMap::new();
    let policies = PolicyRegistry::new();
    let projection = ProjectionRegistry::new();
    let languages = en_fr("en");

    let written = WriteInterceptor::new(&store, &languages, &policies, &projection)
        .intercept(&slot, json!(10))
        .unwrap();
    assert_eq!(written.outcome, WriteOutcome::Opaque);

    let end = capture
        .events_with_field("slot", "option:log_pipeline_opaque")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .expect("Should have end event");
    assert_eq!(end.field(FIELD_OUTCOME), Some("opaque"));
}

#[test]
fn test_failed_write_emits_error_event() {
    let capture = init_test_capture();
    let slot = SlotId::option("log_pipeline_failed");
    let mut policies = PolicyRegistry::new();
    policies.set_base(SlotKind::Option, "log_pipeline_failed", Policy::Leaf);
    let projection = ProjectionRegistry::new();
    let languages = en_fr("en");

    let _ = WriteInterceptor::new(&BrokenStore, &languages, &policies, &projection)
        .intercept_write(&slot, json!("x"));

    let error_event = capture
        .events_with_field("slot", "option:log_pipeline_failed")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_SLOT_READ"));
    assert_eq!(error_event.field("fatal"), Some("false"));
}
