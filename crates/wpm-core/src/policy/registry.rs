//! Policy registry
//!
//! Host integrations contribute to the effective policy of a field. Instead
//! of an implicit hook chain, contributors are registered explicitly with a
//! match key and a priority, and [`PolicyRegistry::resolve`] applies them in
//! a fixed order: ascending priority, then registration order.

use crate::policy::Policy;
use std::collections::HashMap;
use wpm_core_types::SlotKind;

/// What a policy is being resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyContext<'a> {
    pub kind: SlotKind,
    pub field: &'a str,
}

/// Transforms the policy built so far for a matching slot
pub trait PolicyContributor: Send + Sync {
    fn contribute(&self, ctx: &PolicyContext<'_>, policy: Policy) -> Policy;
}

impl<F> PolicyContributor for F
where
    F: Fn(&PolicyContext<'_>, Policy) -> Policy + Send + Sync,
{
    fn contribute(&self, ctx: &PolicyContext<'_>, policy: Policy) -> Policy {
        self(ctx, policy)
    }
}

/// Which slots a contributor applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKey {
    /// Every slot
    Any,
    /// Every field of one slot kind
    Kind(SlotKind),
    /// One field of one slot kind
    Field(SlotKind, String),
}

impl MatchKey {
    pub fn field(kind: SlotKind, field: impl Into<String>) -> Self {
        MatchKey::Field(kind, field.into())
    }

    pub fn matches(&self, ctx: &PolicyContext<'_>) -> bool {
        match self {
            MatchKey::Any => true,
            MatchKey::Kind(kind) => *kind == ctx.kind,
            MatchKey::Field(kind, field) => *kind == ctx.kind && field == ctx.field,
        }
    }
}

/// Inspectable description of one registered contributor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorInfo {
    pub name: String,
    pub key: MatchKey,
    pub priority: i32,
}

struct Registration {
    info: ContributorInfo,
    seq: usize,
    contributor: Box<dyn PolicyContributor>,
}

/// Base policies per field plus an ordered contributor chain
#[derive(Default)]
pub struct PolicyRegistry {
    base: HashMap<(SlotKind, String), Policy>,
    chain: Vec<Registration>,
    next_seq: usize,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting policy for one field
    pub fn set_base(&mut self, kind: SlotKind, field: impl Into<String>, policy: Policy) {
        self.base.insert((kind, field.into()), policy);
    }

    /// Starting policy for one field, before contributors (`Opaque` if unset)
    pub fn base(&self, kind: SlotKind, field: &str) -> Policy {
        self.base
            .get(&(kind, field.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Register a contributor
    ///
    /// Lower priorities run first; equal priorities run in registration order.
    pub fn register<C>(&mut self, name: impl Into<String>, key: MatchKey, priority: i32, contributor: C)
    where
        C: PolicyContributor + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.chain.push(Registration {
            info: ContributorInfo {
                name: name.into(),
                key,
                priority,
            },
            seq,
            contributor: Box::new(contributor),
        });
        self.chain.sort_by_key(|r| (r.info.priority, r.seq));
    }

    /// Effective policy for a field
    pub fn resolve(&self, kind: SlotKind, field: &str) -> Policy {
        let ctx = PolicyContext { kind, field };
        let mut policy = self.base(kind, field);
        for registration in self.chain.iter().filter(|r| r.info.key.matches(&ctx)) {
            policy = registration.contributor.contribute(&ctx, policy);
            tracing::trace!(
                contributor = %registration.info.name,
                slot_kind = %kind,
                field,
                "policy contributor applied"
            );
        }
        policy
    }

    /// The contributor chain in application order
    pub fn contributors(&self) -> Vec<ContributorInfo> {
        self.chain.iter().map(|r| r.info.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl std::fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyRegistry")
            .field("base", &self.base)
            .field("contributors", &self.contributors())
            .finish()
    }
}
