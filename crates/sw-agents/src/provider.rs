//! Decision providers: how an actor chooses its next command.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;

use sw_engine::WorldStateSnapshot;

use crate::error::AgentError;

/// A boxed decision future, so providers stay object-safe.
pub type DecisionFuture<'a> = Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>>;

/// Chooses the next command for an actor, given a projection of what
/// that actor can see and do.
///
/// Implementations may take unbounded wall-clock time (an out-of-process
/// language-model call, a human at a prompt); the scheduler freezes the
/// world while a decision is pending and imposes the timeout.
pub trait DecisionProvider: Send {
    /// Decide on a command for `actor`.
    fn decide<'a>(&'a mut self, actor: &'a str, snapshot: &'a WorldStateSnapshot)
    -> DecisionFuture<'a>;
}

/// Replays a fixed list of commands, then keeps looking around.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    script: VecDeque<String>,
}

impl ScriptedProvider {
    /// Build a provider from a command script.
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: script.into_iter().map(Into::into).collect(),
        }
    }
}

impl DecisionProvider for ScriptedProvider {
    fn decide<'a>(
        &'a mut self,
        _actor: &'a str,
        _snapshot: &'a WorldStateSnapshot,
    ) -> DecisionFuture<'a> {
        let command = self.script.pop_front().unwrap_or_else(|| "look".to_string());
        Box::pin(async move { Ok(command) })
    }
}

/// Always picks the first entry of the discovered action menu. Useful as
/// a deterministic baseline opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstActionProvider;

impl DecisionProvider for FirstActionProvider {
    fn decide<'a>(
        &'a mut self,
        _actor: &'a str,
        snapshot: &'a WorldStateSnapshot,
    ) -> DecisionFuture<'a> {
        let command = snapshot
            .available_actions
            .first()
            .map_or_else(|| "look".to_string(), |a| a.command.clone());
        Box::pin(async move { Ok(command) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_engine::AvailableAction;

    fn empty_snapshot() -> WorldStateSnapshot {
        WorldStateSnapshot {
            location: "kitchen".to_string(),
            inventory: Vec::new(),
            visible_items: Vec::new(),
            visible_characters: Vec::new(),
            exits: Vec::new(),
            available_actions: Vec::new(),
        }
    }

    #[tokio::test]
    async fn scripted_provider_replays_then_looks() {
        let mut provider = ScriptedProvider::new(["take apple", "north"]);
        let snapshot = empty_snapshot();
        assert_eq!(
            provider.decide("alice", &snapshot).await.unwrap(),
            "take apple"
        );
        assert_eq!(provider.decide("alice", &snapshot).await.unwrap(), "north");
        assert_eq!(provider.decide("alice", &snapshot).await.unwrap(), "look");
    }

    #[tokio::test]
    async fn first_action_provider_reads_the_menu() {
        let mut snapshot = empty_snapshot();
        snapshot.available_actions.push(AvailableAction {
            command: "go north".to_string(),
            description: "Go north".to_string(),
        });
        let mut provider = FirstActionProvider;
        assert_eq!(
            provider.decide("alice", &snapshot).await.unwrap(),
            "go north"
        );
    }
}
