//! The action-class contract.

use sw_core::{ActionResult, World};

use crate::binding::{Binding, Invocation};
use crate::error::EngineResult;
use crate::registry::ActionRegistry;

/// Whether an action's preconditions currently hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// All preconditions pass; `apply` may be called.
    Ready,
    /// A precondition failed, with the human-readable reason. This is the
    /// expected-failure tier: no error, no mutation.
    Blocked(String),
}

impl Readiness {
    /// Convenience constructor for the blocked case.
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Blocked(reason.into())
    }

    /// Whether this readiness is `Ready`.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// One verb family: how to recognize its commands, how to enumerate its
/// candidate operands, and how to test and apply it.
///
/// Classes are registered in an [`ActionRegistry`] and instantiated per
/// command as an [`Invocation`]. The resolver and the discovery engine
/// both drive the same three methods, so they cannot disagree about what
/// is legal.
pub trait ActionClass: std::fmt::Debug {
    /// Stable machine name for this class (used in saves and logs).
    fn name(&self) -> &'static str;

    /// The command patterns this class answers to, in priority order.
    fn command_patterns(&self) -> &'static [&'static str];

    /// Whether executing this action ends the acting character's turn.
    /// Declared per class; pure perception declares `false`.
    fn ends_turn(&self) -> bool {
        true
    }

    /// A one-line human description of a concrete invocation, shown in
    /// discovery menus.
    fn describe(&self, invocation: &Invocation) -> String;

    /// Enumerate every plausible operand assignment for the actor in the
    /// current world state, without evaluating preconditions. Discovery
    /// crosses these with `command_patterns`.
    fn combinations(&self, world: &World, actor: &str) -> Vec<Binding>;

    /// Pure precondition probe. `Blocked` carries the reason; `Err` is an
    /// integrity violation (swallowed by discovery, propagated by direct
    /// execution). Must not mutate.
    fn check(&self, world: &World, actor: &str, invocation: &Invocation) -> EngineResult<Readiness>;

    /// Apply the effect. Only called after `check` returned `Ready`;
    /// must fully apply or not at all.
    fn apply(
        &self,
        world: &mut World,
        registry: &ActionRegistry,
        actor: &str,
        invocation: &Invocation,
    ) -> EngineResult<ActionResult>;
}
