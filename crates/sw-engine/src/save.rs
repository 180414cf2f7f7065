//! Saving and restoring games as a name-keyed primitive tree.
//!
//! The world graph serializes without cycles because every
//! cross-entity reference is already a name string: characters point at
//! locations by name, items live inline in exactly one owner. A save
//! additionally records the registered action names, so a load against
//! a registry that dropped one of them fails early instead of producing
//! a game whose history cannot be replayed.

use serde::{Deserialize, Serialize};
use sw_core::World;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::game::Game;
use crate::registry::ActionRegistry;

/// The primitive, cycle-free form of a running game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    /// The full entity graph, items inline in their owners.
    pub world: World,
    /// The actors in turn order.
    pub actors: Vec<String>,
    /// Names of the action classes registered when the game was saved.
    pub actions: Vec<String>,
}

/// Flatten a game into a primitive JSON tree.
pub fn to_primitive(game: &Game) -> EngineResult<serde_json::Value> {
    let saved = SavedGame {
        world: game.world().clone(),
        actors: game.actors().to_vec(),
        actions: game.registry().names(),
    };
    Ok(serde_json::to_value(&saved)?)
}

/// Rebuild a game from a primitive tree, against the standard registry.
pub fn from_primitive(value: serde_json::Value) -> EngineResult<Game> {
    from_primitive_with_registry(value, ActionRegistry::standard())
}

/// Rebuild a game from a primitive tree, against a specific registry.
///
/// Every action name recorded in the save must still be registered,
/// and the restored world must pass its integrity check.
pub fn from_primitive_with_registry(
    value: serde_json::Value,
    registry: ActionRegistry,
) -> EngineResult<Game> {
    let saved: SavedGame = serde_json::from_value(value)?;
    for action in &saved.actions {
        if registry.by_name(action).is_none() {
            return Err(EngineError::UnknownAction(action.clone()));
        }
    }
    saved.world.integrity_check()?;
    info!(world = %saved.world.meta.name, "restored saved game");
    Game::with_registry(saved.world, saved.actors, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::{Character, Item, Location, Prop, WorldMeta};

    fn test_game() -> Game {
        let mut world = World::new(WorldMeta::new("Test"));
        let mut kitchen = Location::new("kitchen");
        kitchen.connect("north", "pantry");
        world.add_location(kitchen).unwrap();
        world.add_location(Location::new("pantry")).unwrap();
        world
            .add_character(Character::new("alice", "kitchen"))
            .unwrap();
        world.add_item("kitchen", Item::new("apple")).unwrap();
        world
            .add_prop(
                "kitchen",
                Prop::new("closet").with_openable().with_container(),
            )
            .unwrap();
        world
            .add_item_to_container("kitchen", "closet", Item::new("broom"))
            .unwrap();
        Game::new(world, vec!["alice".to_string()]).unwrap()
    }

    #[test]
    fn round_trip_preserves_the_graph() {
        let mut game = test_game();
        game.resolve_and_execute("alice", "take apple").unwrap();

        let primitive = to_primitive(&game).unwrap();
        let restored = from_primitive(primitive).unwrap();

        assert_eq!(restored.world(), game.world());
        assert_eq!(restored.actors(), game.actors());
        assert!(restored
            .world()
            .character("alice")
            .unwrap()
            .inventory
            .contains_key("apple"));
    }

    #[test]
    fn unregistered_action_name_fails_the_load() {
        let game = test_game();
        let mut primitive = to_primitive(&game).unwrap();
        primitive["actions"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!("teleport"));
        let err = from_primitive(primitive).unwrap_err();
        assert!(matches!(err, EngineError::UnknownAction(name) if name == "teleport"));
    }

    #[test]
    fn duplicate_entity_name_fails_the_load() {
        let game = test_game();
        let mut primitive = to_primitive(&game).unwrap();
        // A second "apple" in alice's inventory while one sits on the
        // kitchen floor. Loading this would let a later "drop apple"
        // overwrite the floor apple and silently destroy an item.
        primitive["world"]["characters"]["alice"]["inventory"]["apple"] =
            serde_json::to_value(Item::new("apple")).unwrap();
        let err = from_primitive(primitive).unwrap_err();
        assert!(matches!(err, EngineError::World(_)));
    }

    #[test]
    fn garbage_fails_as_malformed() {
        let err = from_primitive(serde_json::json!({"world": 3})).unwrap_err();
        assert!(matches!(err, EngineError::MalformedSave(_)));
    }

    #[test]
    fn dangling_character_location_fails_integrity() {
        let game = test_game();
        let mut primitive = to_primitive(&game).unwrap();
        primitive["world"]["characters"]["alice"]["location"] =
            serde_json::json!("nowhere");
        let err = from_primitive(primitive).unwrap_err();
        assert!(matches!(err, EngineError::World(_)));
    }
}
