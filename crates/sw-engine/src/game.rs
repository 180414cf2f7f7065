//! The turn orchestrator: one writer at a time, everything else reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sw_core::{ActionResult, World};
use tracing::info;
use uuid::Uuid;

use crate::action::Readiness;
use crate::discovery::{enumerate, AvailableAction};
use crate::error::{EngineError, EngineResult};
use crate::parser::{resolve, Resolution};
use crate::registry::ActionRegistry;

/// Where a game sits in its turn cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No turn is underway.
    Idle,
    /// An actor's command is being executed.
    TurnInProgress,
    /// The last command finished; the cursor has not moved yet.
    TurnComplete,
    /// Terminal. No further commands are accepted.
    GameOver,
}

/// Structured export of the most recent executed action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSchema {
    /// Who acted.
    pub actor: String,
    /// Name of the action class that ran.
    pub action: String,
    /// The literal command that was executed.
    pub command: String,
    /// The primary operand, when the command named one.
    pub target: Option<String>,
    /// Where the actor was after the action.
    pub location: String,
    /// The narration the action produced.
    pub description: String,
    /// Whether the action succeeded.
    pub success: bool,
    /// When the action finished.
    pub timestamp: DateTime<Utc>,
}

/// A read projection of everything one character can currently perceive
/// and do, shaped for a decision-making consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStateSnapshot {
    /// The character's current location name.
    pub location: String,
    /// Names of carried items.
    pub inventory: Vec<String>,
    /// Names of items in view: loose on the floor or in open containers.
    pub visible_items: Vec<String>,
    /// Other characters present at the location.
    pub visible_characters: Vec<String>,
    /// Exit labels leading out of the location.
    pub exits: Vec<String>,
    /// Every command the character could execute right now.
    pub available_actions: Vec<AvailableAction>,
}

/// One running world with its actors, registry, and turn cursor.
///
/// The engine is single-threaded by contract: exactly one actor, the
/// one the cursor points at, mutates the world at a time.
#[derive(Debug)]
pub struct Game {
    id: Uuid,
    world: World,
    registry: ActionRegistry,
    actors: Vec<String>,
    cursor: usize,
    phase: TurnPhase,
    last_action: Option<ActionSchema>,
}

impl Game {
    /// Start a game over a world with the standard action registry.
    ///
    /// Actors take turns in the order given. Every actor must exist in
    /// the world as a character.
    pub fn new(world: World, actors: Vec<String>) -> EngineResult<Self> {
        Self::with_registry(world, actors, ActionRegistry::standard())
    }

    /// Start a game with a custom action registry.
    pub fn with_registry(
        world: World,
        actors: Vec<String>,
        registry: ActionRegistry,
    ) -> EngineResult<Self> {
        for actor in &actors {
            if world.character(actor).is_none() {
                return Err(EngineError::ActorNotFound(actor.clone()));
            }
        }
        Ok(Self {
            id: Uuid::new_v4(),
            world,
            registry,
            actors,
            cursor: 0,
            phase: TurnPhase::Idle,
            last_action: None,
        })
    }

    /// This game's unique id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The world the game runs over.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The action registry in use.
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// The actors in turn order.
    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    /// The current turn phase.
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Whose turn it is. A pure read: the cursor never moves here.
    pub fn next_agent(&self) -> Option<&str> {
        if self.phase == TurnPhase::GameOver {
            return None;
        }
        self.actors.get(self.cursor).map(String::as_str)
    }

    /// Hand control to the next actor in the ring. The only cursor
    /// mutator; callers gate it on the executed action's turn-ending
    /// flag.
    pub fn advance_turn(&mut self) {
        if self.phase == TurnPhase::GameOver || self.actors.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.actors.len();
        self.phase = TurnPhase::Idle;
    }

    /// Whether the action class that last ran ends the actor's turn.
    pub fn last_action_ends_turn(&self) -> bool {
        self.last_action
            .as_ref()
            .and_then(|schema| self.registry.by_name(&schema.action))
            .is_some_and(|class| class.ends_turn())
    }

    /// Resolve a line of input for `actor` and execute it.
    ///
    /// Expected failures (blocked preconditions, unrecognized input)
    /// come back as `success=false` results; integrity errors raise.
    /// The turn cursor is not touched: callers advance it themselves
    /// when the executed action ends the turn.
    pub fn resolve_and_execute(
        &mut self,
        actor: &str,
        input: &str,
    ) -> EngineResult<ActionResult> {
        if self.phase == TurnPhase::GameOver {
            return Err(EngineError::GameOver);
        }
        if self.world.character(actor).is_none() {
            return Err(EngineError::ActorNotFound(actor.to_string()));
        }

        self.phase = TurnPhase::TurnInProgress;
        let resolution = resolve(&self.world, &self.registry, actor, input);
        let result = match self.run_resolution(actor, &resolution) {
            Ok(result) => result,
            // An integrity error aborts the turn; leave the game in a
            // resumable phase rather than stuck mid-turn.
            Err(e) => {
                self.phase = TurnPhase::Idle;
                return Err(e);
            }
        };
        self.phase = TurnPhase::TurnComplete;
        info!(
            game = %self.id,
            actor,
            input,
            success = result.success,
            "executed"
        );
        Ok(result)
    }

    fn run_resolution(
        &mut self,
        actor: &str,
        resolution: &Resolution,
    ) -> EngineResult<ActionResult> {
        match resolution {
            Resolution::Unrecognized(text) => Ok(ActionResult::fail(format!(
                "You don't know how to \"{text}\"."
            ))),
            Resolution::Command { action, invocation } => {
                let class = self
                    .registry
                    .by_name(action)
                    .ok_or_else(|| EngineError::UnknownAction((*action).to_string()))?;
                // Direct execution is the loud path: integrity errors
                // from the readiness check propagate to the caller.
                let result = match class.check(&self.world, actor, invocation)? {
                    Readiness::Blocked(reason) => ActionResult::fail(reason),
                    Readiness::Ready => {
                        class.apply(&mut self.world, &self.registry, actor, invocation)?
                    }
                };
                let target = invocation.primary_operand().map(str::to_string);
                self.record(actor, action, invocation.command(), target, &result);
                Ok(result)
            }
            Resolution::Sequence(parts) => {
                let mut combined: Option<ActionResult> = None;
                for part in parts {
                    let result = self.run_resolution(actor, part)?;
                    let stop = !result.success;
                    combined = Some(match combined {
                        None => result,
                        Some(mut acc) => {
                            acc.description.push('\n');
                            acc.description.push_str(&result.description);
                            acc.success = result.success;
                            if result.state_changed.is_some() {
                                acc.state_changed = result.state_changed;
                            }
                            acc.events.extend(result.events);
                            acc
                        }
                    });
                    // A failed step aborts the rest of the sequence.
                    if stop {
                        break;
                    }
                }
                Ok(combined
                    .unwrap_or_else(|| ActionResult::fail("Nothing to do.".to_string())))
            }
        }
    }

    fn record(
        &mut self,
        actor: &str,
        action: &str,
        command: String,
        target: Option<String>,
        result: &ActionResult,
    ) {
        let location = self
            .world
            .character(actor)
            .map(|c| c.location.clone())
            .unwrap_or_default();
        self.last_action = Some(ActionSchema {
            actor: actor.to_string(),
            action: action.to_string(),
            command,
            target,
            location,
            description: result.description.clone(),
            success: result.success,
            timestamp: Utc::now(),
        });
    }

    /// Every command `actor` could execute right now.
    pub fn enumerate_actions(&self, actor: &str) -> EngineResult<Vec<AvailableAction>> {
        enumerate(&self.world, &self.registry, actor)
    }

    /// Build the read projection a decision-maker sees for `actor`.
    pub fn world_state_snapshot(&self, actor: &str) -> EngineResult<WorldStateSnapshot> {
        let character = self
            .world
            .character(actor)
            .ok_or_else(|| EngineError::ActorNotFound(actor.to_string()))?;
        let location = self.world.location_of(actor)?;

        let mut visible_items: Vec<String> = location.items.keys().cloned().collect();
        for prop in location.props.values().filter(|p| p.container_accessible()) {
            visible_items.extend(prop.contents().map(|i| i.name().to_string()));
        }
        let visible_characters = self
            .world
            .characters_at(location.name())
            .into_iter()
            .map(sw_core::Character::name)
            .filter(|n| !n.eq_ignore_ascii_case(actor))
            .map(str::to_string)
            .collect();

        Ok(WorldStateSnapshot {
            location: location.name().to_string(),
            inventory: character.inventory.keys().cloned().collect(),
            visible_items,
            visible_characters,
            exits: location.connections.keys().cloned().collect(),
            available_actions: self.enumerate_actions(actor)?,
        })
    }

    /// The most recent executed action, for external reporting.
    pub fn last_action_schema(&self) -> EngineResult<&ActionSchema> {
        self.last_action.as_ref().ok_or(EngineError::NoActionYet)
    }

    /// End the game. Terminal: every later command errors with
    /// [`EngineError::GameOver`].
    pub fn end_game(&mut self) {
        self.phase = TurnPhase::GameOver;
        info!(game = %self.id, "game over");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::{Character, Item, Location, WorldMeta};

    fn test_world() -> World {
        let mut world = World::new(WorldMeta::new("Test"));
        let mut kitchen = Location::new("kitchen");
        kitchen.connect("north", "pantry");
        let mut pantry = Location::new("pantry");
        pantry.connect("south", "kitchen");
        world.add_location(kitchen).unwrap();
        world.add_location(pantry).unwrap();
        world
            .add_character(Character::new("alice", "kitchen"))
            .unwrap();
        world
            .add_character(Character::new("bob", "kitchen"))
            .unwrap();
        world.add_item("kitchen", Item::new("apple")).unwrap();
        world
    }

    fn test_game() -> Game {
        Game::new(test_world(), vec!["alice".to_string(), "bob".to_string()]).unwrap()
    }

    #[test]
    fn unknown_actor_is_rejected_at_construction() {
        let err = Game::new(test_world(), vec!["eve".to_string()]).unwrap_err();
        assert!(matches!(err, EngineError::ActorNotFound(_)));
    }

    #[test]
    fn integrity_error_leaves_a_resumable_phase() {
        // A dangling location slips past construction when the world
        // arrives deserialized; the error surfaces on the execution path
        // and must not strand the game mid-turn.
        let mut value = serde_json::to_value(test_world()).unwrap();
        value["characters"]["alice"]["location"] = serde_json::json!("nowhere");
        let world: World = serde_json::from_value(value).unwrap();
        let mut game =
            Game::new(world, vec!["alice".to_string(), "bob".to_string()]).unwrap();

        assert!(game.resolve_and_execute("alice", "take apple").is_err());
        assert_eq!(game.phase(), &TurnPhase::Idle);
        assert_eq!(game.next_agent(), Some("alice"));
    }

    #[test]
    fn turn_ring_cycles_strictly() {
        let mut game = test_game();
        assert_eq!(game.next_agent(), Some("alice"));
        assert_eq!(game.next_agent(), Some("alice"));
        game.advance_turn();
        assert_eq!(game.next_agent(), Some("bob"));
        game.advance_turn();
        assert_eq!(game.next_agent(), Some("alice"));
    }

    #[test]
    fn execute_does_not_move_the_cursor() {
        let mut game = test_game();
        game.resolve_and_execute("alice", "take apple").unwrap();
        assert_eq!(game.next_agent(), Some("alice"));
    }

    #[test]
    fn unrecognized_input_is_a_noop_failure() {
        let mut game = test_game();
        let before = serde_json::to_value(game.world()).unwrap();
        let result = game.resolve_and_execute("alice", "xyzzy").unwrap();
        assert!(!result.success);
        assert!(result.description.contains("xyzzy"));
        assert_eq!(serde_json::to_value(game.world()).unwrap(), before);
    }

    #[test]
    fn last_action_schema_requires_an_action() {
        let mut game = test_game();
        assert!(matches!(
            game.last_action_schema(),
            Err(EngineError::NoActionYet)
        ));
        game.resolve_and_execute("alice", "take apple").unwrap();
        let schema = game.last_action_schema().unwrap();
        assert_eq!(schema.actor, "alice");
        assert_eq!(schema.action, "take");
        assert_eq!(schema.command, "take apple");
        assert_eq!(schema.target.as_deref(), Some("apple"));
        assert!(schema.success);
    }

    #[test]
    fn sequences_stop_at_the_first_failure() {
        let mut game = test_game();
        let result = game
            .resolve_and_execute("alice", "take apple, take apple, north")
            .unwrap();
        assert!(!result.success);
        // The second take failed, so the move never ran.
        assert_eq!(game.world().character("alice").unwrap().location, "kitchen");
    }

    #[test]
    fn snapshot_projects_the_actor_view() {
        let game = test_game();
        let snapshot = game.world_state_snapshot("alice").unwrap();
        assert_eq!(snapshot.location, "kitchen");
        assert_eq!(snapshot.visible_items, vec!["apple".to_string()]);
        assert_eq!(snapshot.visible_characters, vec!["bob".to_string()]);
        assert_eq!(snapshot.exits, vec!["north".to_string()]);
        assert!(snapshot
            .available_actions
            .iter()
            .any(|a| a.command == "take apple"));
    }

    #[test]
    fn game_over_is_terminal() {
        let mut game = test_game();
        game.end_game();
        assert_eq!(game.next_agent(), None);
        let err = game.resolve_and_execute("alice", "look").unwrap_err();
        assert!(matches!(err, EngineError::GameOver));
        game.advance_turn();
        assert_eq!(game.phase(), &TurnPhase::GameOver);
    }
}
