//! Write interception pipeline
//!
//! The host calls [`WriteInterceptor::intercept_write`] just before it
//! persists a value into a slot. The interceptor merges the edit into what
//! the slot already holds and hands back the value to store instead.
//!
//! ## Flow (in order):
//! 1. Value already multilingual: store it unchanged
//! 2. Resolve the slot's policy; `Opaque` at the root: store unchanged
//! 3. Active language not among the known ones: warn and continue
//! 4. Read the previous raw value with projection suspended
//! 5. Decode, merge, encode

use crate::codec::{decode, encode, is_multilingual};
use crate::errors::{Result, WpmError};
use crate::merge::merge;
use crate::model::FlatValue;
use crate::policy::PolicyRegistry;
use crate::projection::{with_projection_suspended, ProjectionRegistry};
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::HashMap;
use std::time::Instant;
use wpm_core_types::schema::{OUTCOME_ALREADY_MULTILINGUAL, OUTCOME_MERGED, OUTCOME_OPAQUE};
use wpm_core_types::{LangCode, LanguageSet, SlotId};

/// Host storage, read side
pub trait SlotStore {
    /// Current persisted value of `slot`
    ///
    /// A slot that was never written reads as `null`.
    fn read_raw(&self, slot: &SlotId) -> Result<FlatValue>;
}

impl SlotStore for HashMap<SlotId, FlatValue> {
    fn read_raw(&self, slot: &SlotId) -> Result<FlatValue> {
        Ok(self.get(slot).cloned().unwrap_or(FlatValue::Null))
    }
}

/// Host language state for the current request
pub trait LanguageContext {
    fn active_language(&self) -> LangCode;
    fn known_languages(&self) -> LanguageSet;
}

/// Fixed language context
#[derive(Debug, Clone)]
pub struct StaticLanguages {
    pub active: LangCode,
    pub known: LanguageSet,
}

impl StaticLanguages {
    pub fn new(active: LangCode, known: LanguageSet) -> Self {
        Self { active, known }
    }
}

impl LanguageContext for StaticLanguages {
    fn active_language(&self) -> LangCode {
        self.active.clone()
    }

    fn known_languages(&self) -> LanguageSet {
        self.known.clone()
    }
}

/// How a write was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The incoming value already carried the marker
    AlreadyMultilingual,
    /// The slot's policy is `Opaque` at the root
    Opaque,
    /// The edit was merged into the stored value
    Merged,
}

impl WriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteOutcome::AlreadyMultilingual => OUTCOME_ALREADY_MULTILINGUAL,
            WriteOutcome::Opaque => OUTCOME_OPAQUE,
            WriteOutcome::Merged => OUTCOME_MERGED,
        }
    }
}

/// Value to persist plus how it was produced
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptedWrite {
    pub value: FlatValue,
    pub outcome: WriteOutcome,
}

/// Merges single-language edits into stored multilingual values
pub struct WriteInterceptor<'a, S, L> {
    store: &'a S,
    languages: &'a L,
    policies: &'a PolicyRegistry,
    projection: &'a ProjectionRegistry,
}

impl<'a, S, L> WriteInterceptor<'a, S, L>
where
    S: SlotStore,
    L: LanguageContext,
{
    pub fn new(
        store: &'a S,
        languages: &'a L,
        policies: &'a PolicyRegistry,
        projection: &'a ProjectionRegistry,
    ) -> Self {
        Self {
            store,
            languages,
            policies,
            projection,
        }
    }

    /// Value the host should persist in place of `new_value`
    ///
    /// # Errors
    ///
    /// - `SlotRead` if the previous value cannot be read
    /// - `GuardRestoreFailed` if projection could not be re-enabled (fatal)
    pub fn intercept_write(&self, slot: &SlotId, new_value: FlatValue) -> Result<FlatValue> {
        self.intercept(slot, new_value).map(|w| w.value)
    }

    /// Like [`intercept_write`](Self::intercept_write), also reporting the outcome
    pub fn intercept(&self, slot: &SlotId, new_value: FlatValue) -> Result<InterceptedWrite> {
        log_op_start!("intercept_write", slot = %slot);
        let start = Instant::now();

        let result = self.run(slot, new_value).map_err(|e| {
            log_op_error!(
                "intercept_write",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                slot = %slot
            );
            e
        })?;

        log_op_end!(
            "intercept_write",
            duration_ms = start.elapsed().as_millis() as u64,
            slot = %slot,
            outcome = result.outcome.as_str()
        );
        Ok(result)
    }

    fn run(&self, slot: &SlotId, new_value: FlatValue) -> Result<InterceptedWrite> {
        if is_multilingual(&new_value) {
            return Ok(InterceptedWrite {
                value: new_value,
                outcome: WriteOutcome::AlreadyMultilingual,
            });
        }

        let policy = self.policies.resolve(slot.kind, &slot.field);
        if policy.is_opaque() {
            return Ok(InterceptedWrite {
                value: new_value,
                outcome: WriteOutcome::Opaque,
            });
        }

        let active = self.languages.active_language();
        if !self.languages.known_languages().contains(&active) {
            tracing::warn!(slot = %slot, lang = %active, "active language is not a known language");
        }

        let old_flat = with_projection_suspended(self.projection, slot, || {
            self.store.read_raw(slot).map_err(|e| match e {
                WpmError::SlotRead { .. } => e,
                other => WpmError::SlotRead {
                    slot: slot.to_string(),
                    message: other.to_string(),
                },
            })
        })?;

        let old = decode(&old_flat);
        let merged = merge(&old, &new_value, &active, &policy);
        tracing::debug!(slot = %slot, lang = %active, "write merged");

        Ok(InterceptedWrite {
            value: encode(&merged),
            outcome: WriteOutcome::Merged,
        })
    }
}
