//! The asynchronous turn loop over a synchronous engine.
//!
//! One turn fully completes before the next begins: pick the next actor
//! (pure), await that actor's decision while the world stays frozen,
//! execute the returned command synchronously, then advance the cursor
//! if the executed action ends the turn. A decision that errors or times
//! out falls back to a safe command instead of stalling the ring.

use std::collections::BTreeMap;

use sw_core::ActionResult;
use sw_engine::Game;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::SchedulerConfig;
use crate::error::{AgentError, AgentResult};
use crate::provider::DecisionProvider;

/// The outcome of one scheduled turn step.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Who acted.
    pub actor: String,
    /// The command that was executed.
    pub command: String,
    /// Whether the command came from the fallback instead of the provider.
    pub fell_back: bool,
    /// What the engine reported.
    pub result: ActionResult,
    /// Whether the turn cursor advanced afterwards.
    pub turn_ended: bool,
}

/// Drives a game by asking each actor's provider for decisions.
pub struct TurnScheduler {
    game: Game,
    providers: BTreeMap<String, Box<dyn DecisionProvider>>,
    config: SchedulerConfig,
}

impl TurnScheduler {
    /// Build a scheduler over a game.
    pub fn new(game: Game, config: SchedulerConfig) -> Self {
        Self {
            game,
            providers: BTreeMap::new(),
            config,
        }
    }

    /// Register the decision provider for an actor.
    pub fn set_provider<P>(&mut self, actor: impl Into<String>, provider: P)
    where
        P: DecisionProvider + 'static,
    {
        self.providers.insert(actor.into(), Box::new(provider));
    }

    /// The game being driven.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Give the game back.
    pub fn into_game(self) -> Game {
        self.game
    }

    /// Run one full turn step: decide, execute, maybe advance.
    ///
    /// The engine is only touched after the decision resolves, so a
    /// cancelled or timed-out decision leaves the world untouched.
    pub async fn step(&mut self) -> AgentResult<TurnReport> {
        let actor = self
            .game
            .next_agent()
            .ok_or(AgentError::GameOver)?
            .to_string();
        let snapshot = self.game.world_state_snapshot(&actor)?;
        let provider = self
            .providers
            .get_mut(&actor)
            .ok_or_else(|| AgentError::NoProvider(actor.clone()))?;

        let budget = self.config.decision_timeout;
        let decision = match timeout(budget, provider.decide(&actor, &snapshot)).await {
            Ok(Ok(command)) => Ok(command),
            Ok(Err(err)) => {
                warn!(actor = %actor, %err, "decision failed, falling back");
                Err(())
            }
            Err(_) => {
                warn!(actor = %actor, ?budget, "decision timed out, falling back");
                Err(())
            }
        };
        let fell_back = decision.is_err();
        let command = decision.unwrap_or_else(|()| self.config.fallback_command.clone());

        let before = self.game.last_action_schema().ok().cloned();
        let result = self.game.resolve_and_execute(&actor, &command)?;

        // Advance unless this step recorded a non-turn-ending action.
        // Unrecognized input records nothing and still costs the turn,
        // so a confused provider cannot hold the ring forever.
        let recorded = self
            .game
            .last_action_schema()
            .ok()
            .is_some_and(|schema| before.as_ref() != Some(schema));
        let turn_ended = !recorded || self.game.last_action_ends_turn();
        if turn_ended {
            self.game.advance_turn();
        }

        info!(
            actor = %actor,
            command = %command,
            success = result.success,
            turn_ended,
            "turn step"
        );
        Ok(TurnReport {
            actor,
            command,
            fell_back,
            result,
            turn_ended,
        })
    }

    /// Run `steps` turn steps back to back.
    pub async fn run(&mut self, steps: usize) -> AgentResult<Vec<TurnReport>> {
        let mut reports = Vec::with_capacity(steps);
        for _ in 0..steps {
            reports.push(self.step().await?);
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{DecisionFuture, ScriptedProvider};
    use std::time::Duration;
    use sw_core::{Character, Item, Location, World, WorldMeta};
    use sw_engine::WorldStateSnapshot;

    fn test_game() -> Game {
        let mut world = World::new(WorldMeta::new("Test"));
        let mut kitchen = Location::new("kitchen");
        kitchen.connect("north", "pantry");
        world.add_location(kitchen).unwrap();
        world.add_location(Location::new("pantry")).unwrap();
        world
            .add_character(Character::new("alice", "kitchen"))
            .unwrap();
        world
            .add_character(Character::new("bob", "kitchen"))
            .unwrap();
        world.add_item("kitchen", Item::new("apple")).unwrap();
        Game::new(world, vec!["alice".to_string(), "bob".to_string()]).unwrap()
    }

    struct StalledProvider;

    impl DecisionProvider for StalledProvider {
        fn decide<'a>(
            &'a mut self,
            _actor: &'a str,
            _snapshot: &'a WorldStateSnapshot,
        ) -> DecisionFuture<'a> {
            Box::pin(std::future::pending())
        }
    }

    #[tokio::test]
    async fn turns_alternate_between_actors() {
        let mut scheduler = TurnScheduler::new(test_game(), SchedulerConfig::default());
        scheduler.set_provider("alice", ScriptedProvider::new(["take apple"]));
        scheduler.set_provider("bob", ScriptedProvider::new(["go north"]));

        let first = scheduler.step().await.unwrap();
        assert_eq!(first.actor, "alice");
        assert!(first.result.success);
        assert!(first.turn_ended);

        let second = scheduler.step().await.unwrap();
        assert_eq!(second.actor, "bob");
        assert_eq!(second.command, "go north");
        assert_eq!(
            scheduler.game().world().character("bob").unwrap().location,
            "pantry"
        );
    }

    #[tokio::test]
    async fn perception_keeps_the_turn() {
        let mut scheduler = TurnScheduler::new(test_game(), SchedulerConfig::default());
        scheduler.set_provider("alice", ScriptedProvider::new(["look", "take apple"]));
        scheduler.set_provider("bob", ScriptedProvider::new(["look"]));

        let looked = scheduler.step().await.unwrap();
        assert_eq!(looked.actor, "alice");
        assert!(!looked.turn_ended);

        let took = scheduler.step().await.unwrap();
        assert_eq!(took.actor, "alice");
        assert!(took.turn_ended);
    }

    #[tokio::test]
    async fn timeout_falls_back_to_the_safe_command() {
        let config = SchedulerConfig::new().with_decision_timeout(Duration::from_millis(10));
        let mut scheduler = TurnScheduler::new(test_game(), config);
        scheduler.set_provider("alice", StalledProvider);

        let report = scheduler.step().await.unwrap();
        assert!(report.fell_back);
        assert_eq!(report.command, "look");
        assert!(report.result.success);
        // The fallback is perception: alice keeps her turn.
        assert!(!report.turn_ended);
        assert_eq!(scheduler.game().next_agent(), Some("alice"));
    }

    #[tokio::test]
    async fn unrecognized_command_still_costs_the_turn() {
        let mut scheduler = TurnScheduler::new(test_game(), SchedulerConfig::default());
        scheduler.set_provider("alice", ScriptedProvider::new(["xyzzy"]));
        scheduler.set_provider("bob", ScriptedProvider::new(["look"]));

        let report = scheduler.step().await.unwrap();
        assert!(!report.result.success);
        assert!(report.turn_ended);
        assert_eq!(scheduler.game().next_agent(), Some("bob"));
    }

    #[tokio::test]
    async fn missing_provider_is_an_error() {
        let mut scheduler = TurnScheduler::new(test_game(), SchedulerConfig::default());
        let err = scheduler.step().await.unwrap_err();
        assert!(matches!(err, AgentError::NoProvider(name) if name == "alice"));
    }
}
