//! Exhaustive enumeration of currently-executable commands.
//!
//! Discovery crosses every action class's command patterns with the
//! operand combinations the class reports for the actor's situation,
//! then keeps the invocations whose readiness probe comes back
//! [`Readiness::Ready`]. Because each surviving entry is rendered from
//! an [`Invocation`], every discovered command string is one the
//! resolver will parse back to the same invocation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sw_core::World;
use tracing::debug;

use crate::action::Readiness;
use crate::binding::{covers, Invocation};
use crate::error::EngineResult;
use crate::registry::ActionRegistry;

/// One executable command, phrased for a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableAction {
    /// The literal command string the resolver accepts.
    pub command: String,
    /// A short human-readable description of what the command does.
    pub description: String,
}

/// Enumerate every command `actor` could execute right now.
///
/// Probing is non-raising: a readiness check that errors marks that
/// candidate unavailable instead of aborting the enumeration, so one
/// misconfigured prop cannot hide the rest of the menu. Output order is
/// deterministic: registry order, then pattern order, then operand
/// order.
pub fn enumerate(
    world: &World,
    registry: &ActionRegistry,
    actor: &str,
) -> EngineResult<Vec<AvailableAction>> {
    let mut available = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for class in registry.classes() {
        let combinations = class.combinations(world, actor);
        for &pattern in class.command_patterns() {
            for binding in &combinations {
                if !covers(pattern, binding) {
                    continue;
                }
                let invocation = Invocation::new(pattern, binding.clone());
                match class.check(world, actor, &invocation) {
                    Ok(Readiness::Ready) => {
                        let command = invocation.command();
                        if seen.insert(command.clone()) {
                            available.push(AvailableAction {
                                command,
                                description: class.describe(&invocation),
                            });
                        }
                    }
                    Ok(Readiness::Blocked(_)) => {}
                    Err(err) => {
                        debug!(action = class.name(), %err, "readiness probe failed");
                    }
                }
            }
        }
    }
    Ok(available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ActionRegistry;
    use sw_core::{Character, Item, Location, Prop, WorldMeta};

    fn test_world() -> World {
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
        world
    }

    fn commands(available: &[AvailableAction]) -> Vec<&str> {
        available.iter().map(|a| a.command.as_str()).collect()
    }

    #[test]
    fn enumerates_ready_commands_only() {
        let world = test_world();
        let registry = ActionRegistry::standard();
        let available = enumerate(&world, &registry, "alice").unwrap();
        let commands = commands(&available);

        assert!(commands.contains(&"go north"));
        assert!(commands.contains(&"take apple"));
        assert!(commands.contains(&"open closet"));
        assert!(commands.contains(&"look"));
        // The closet is closed: its contents are out of reach and it
        // cannot be opened twice.
        assert!(!commands.iter().any(|c| c.contains("broom")));
        assert!(!commands.contains(&"close closet"));
    }

    #[test]
    fn opening_the_container_extends_the_menu() {
        let mut world = test_world();
        world.prop_mut("kitchen", "closet").unwrap().open();
        let registry = ActionRegistry::standard();
        let available = enumerate(&world, &registry, "alice").unwrap();
        let commands = commands(&available);

        assert!(commands.contains(&"take broom from closet"));
        assert!(commands.contains(&"close closet"));
        assert!(!commands.contains(&"open closet"));
    }

    #[test]
    fn descriptions_follow_the_action_phrasing() {
        let world = test_world();
        let registry = ActionRegistry::standard();
        let available = enumerate(&world, &registry, "alice").unwrap();
        let take = available
            .iter()
            .find(|a| a.command == "take apple")
            .unwrap();
        assert_eq!(take.description, "Pick up the apple");
    }

    #[test]
    fn order_is_stable_across_runs() {
        let world = test_world();
        let registry = ActionRegistry::standard();
        let first = enumerate(&world, &registry, "alice").unwrap();
        let second = enumerate(&world, &registry, "alice").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_actor_yields_empty_menu() {
        let world = test_world();
        let registry = ActionRegistry::standard();
        let available = enumerate(&world, &registry, "nobody").unwrap();
        assert!(available.is_empty());
    }
}
