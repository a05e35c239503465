use crate::errors::{Result, WpmError};
use crate::model::FlatValue;
use crate::projection::translate::{translate_value, Fallback};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use wpm_core_types::{LangCode, SlotId};

#[derive(Debug, Default)]
struct SlotState {
    registered: bool,
    /// Registration in effect before each active suspension, innermost last
    saved: Vec<bool>,
    /// Set when a guard failed to restore; the saved stack is no longer trusted
    poisoned: Option<String>,
}

impl SlotState {
    fn check_poisoned(&self, slot: &SlotId) -> Result<()> {
        match &self.poisoned {
            Some(reason) => Err(WpmError::GuardRestoreFailed {
                slot: slot.to_string(),
                reason: format!("projection left suspended by an earlier failed restore: {}", reason),
            }),
            None => Ok(()),
        }
    }
}

/// Per-slot registration of the host's projecting read filter
///
/// Shared by every request in the process. The only way to switch a
/// registered filter off is [`suspend`](Self::suspend), which hands back a
/// guard that puts the previous registration back.
#[derive(Debug, Default)]
pub struct ProjectionRegistry {
    slots: Mutex<HashMap<SlotId, SlotState>>,
}

impl ProjectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SlotId, SlotState>>> {
        self.slots.lock().map_err(|_| WpmError::Internal {
            message: "projection registry lock poisoned".to_string(),
        })
    }

    /// Mark the projecting filter as installed for `slot`
    pub fn register(&self, slot: &SlotId) -> Result<()> {
        self.lock()?.entry(slot.clone()).or_default().registered = true;
        Ok(())
    }

    pub fn unregister(&self, slot: &SlotId) -> Result<()> {
        if let Some(state) = self.lock()?.get_mut(slot) {
            state.registered = false;
        }
        Ok(())
    }

    pub fn is_registered(&self, slot: &SlotId) -> Result<bool> {
        Ok(self.lock()?.get(slot).is_some_and(|s| s.registered))
    }

    /// Number of suspensions currently active for `slot`
    pub fn suspended_depth(&self, slot: &SlotId) -> Result<usize> {
        Ok(self.lock()?.get(slot).map_or(0, |s| s.saved.len()))
    }

    pub fn is_poisoned(&self, slot: &SlotId) -> Result<bool> {
        Ok(self.lock()?.get(slot).is_some_and(|s| s.poisoned.is_some()))
    }

    /// Put a poisoned slot back into a known state
    ///
    /// Active suspensions are discarded and the registration in effect
    /// before the outermost one is reinstated. Guards still alive for the
    /// slot will fail to restore and poison it again.
    pub fn recover(&self, slot: &SlotId) -> Result<()> {
        if let Some(state) = self.lock()?.get_mut(slot) {
            if let Some(reason) = state.poisoned.take() {
                if let Some(&outermost) = state.saved.first() {
                    state.registered = outermost;
                }
                state.saved.clear();
                tracing::warn!(slot = %slot, reason = %reason, "projection state recovered");
            }
        }
        Ok(())
    }

    /// Host read path for `slot`
    ///
    /// Returns `raw` collapsed to `lang` while the filter is registered and
    /// `raw` untouched otherwise.
    ///
    /// # Errors
    ///
    /// `GuardRestoreFailed` while the slot is poisoned.
    pub fn read(
        &self,
        slot: &SlotId,
        raw: &FlatValue,
        lang: &LangCode,
        fallback: &Fallback,
    ) -> Result<FlatValue> {
        let registered = match self.lock()?.get(slot) {
            Some(state) => {
                state.check_poisoned(slot)?;
                state.registered
            }
            None => false,
        };
        if registered {
            Ok(translate_value(raw, lang, fallback))
        } else {
            Ok(raw.clone())
        }
    }

    /// Switch projection off for `slot` until the returned guard is restored
    /// or dropped
    ///
    /// Suspensions nest: each guard restores the registration that was in
    /// effect when it was taken.
    ///
    /// # Errors
    ///
    /// `GuardRestoreFailed` while the slot is poisoned.
    pub fn suspend(&self, slot: &SlotId) -> Result<ProjectionGuard<'_>> {
        let mut slots = self.lock()?;
        let state = slots.entry(slot.clone()).or_default();
        state.check_poisoned(slot)?;
        state.saved.push(state.registered);
        state.registered = false;
        let depth = state.saved.len();
        tracing::trace!(slot = %slot, depth, "projection suspended");

        Ok(ProjectionGuard {
            registry: self,
            slot: slot.clone(),
            depth,
            restored: false,
        })
    }

    fn restore_slot(&self, slot: &SlotId, depth: usize) -> Result<()> {
        let fail = |reason: String| WpmError::GuardRestoreFailed {
            slot: slot.to_string(),
            reason,
        };

        let mut slots = self
            .slots
            .lock()
            .map_err(|_| fail("registry lock poisoned".to_string()))?;
        let state = slots
            .get_mut(slot)
            .ok_or_else(|| fail("slot state missing".to_string()))?;

        if state.saved.len() != depth {
            let reason = format!(
                "guard at depth {} restored while {} suspensions are active",
                depth,
                state.saved.len()
            );
            state.poisoned.get_or_insert_with(|| reason.clone());
            return Err(fail(reason));
        }

        let prior = state
            .saved
            .pop()
            .ok_or_else(|| fail("no saved registration".to_string()))?;
        state.registered = prior;
        tracing::trace!(slot = %slot, depth, registered = prior, "projection restored");
        Ok(())
    }
}

/// Active suspension of one slot's projection
///
/// [`restore`](Self::restore) reports failures to the caller. Dropping the
/// guard without restoring (early return, `?`, panic) restores as well and
/// logs a failure at `error`. Either way a failed restore poisons the slot,
/// so later suspensions and reads of it fail until
/// [`recover`](ProjectionRegistry::recover) is called.
#[must_use = "dropping the guard restores projection immediately"]
#[derive(Debug)]
pub struct ProjectionGuard<'a> {
    registry: &'a ProjectionRegistry,
    slot: SlotId,
    depth: usize,
    restored: bool,
}

impl ProjectionGuard<'_> {
    pub fn slot(&self) -> &SlotId {
        &self.slot
    }

    /// Put back the registration in effect before this guard was taken
    ///
    /// # Errors
    ///
    /// `GuardRestoreFailed` if an inner suspension of the same slot is still
    /// active or the registry is unusable. This is fatal for the request.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        self.registry.restore_slot(&self.slot, self.depth)
    }
}

impl Drop for ProjectionGuard<'_> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if let Err(err) = self.registry.restore_slot(&self.slot, self.depth) {
            tracing::error!(slot = %self.slot, error = %err, "projection guard failed to restore on drop");
        }
    }
}

/// Run `read_fn` with projection of `slot` suspended
///
/// The prior registration is back in place before this returns, whether
/// `read_fn` succeeded, failed or panicked. A failed restore wins over the
/// read's own result.
pub fn with_projection_suspended<F>(
    registry: &ProjectionRegistry,
    slot: &SlotId,
    read_fn: F,
) -> Result<FlatValue>
where
    F: FnOnce() -> Result<FlatValue>,
{
    let guard = registry.suspend(slot)?;
    let outcome = read_fn();
    guard.restore()?;
    outcome
}
