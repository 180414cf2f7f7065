//! Movement across location connections.

use sw_core::{ActionResult, World};

use super::bind1;
use crate::action::{ActionClass, Readiness};
use crate::actions::look::render_location;
use crate::binding::{Binding, Invocation};
use crate::error::EngineResult;
use crate::registry::ActionRegistry;

/// Relocate the actor along a declared exit.
#[derive(Debug, Clone, Copy)]
pub struct GoAction;

impl GoAction {
    fn canonical_direction(world: &World, actor: &str, input: &str) -> EngineResult<Option<String>> {
        let location = world.location_of(actor)?;
        Ok(location
            .connections
            .keys()
            .find(|d| d.eq_ignore_ascii_case(input))
            .cloned())
    }
}

impl ActionClass for GoAction {
    fn name(&self) -> &'static str {
        "go"
    }

    fn command_patterns(&self) -> &'static [&'static str] {
        &[
            "go {direction}",
            "move {direction}",
            "walk {direction}",
            "head {direction}",
        ]
    }

    fn describe(&self, invocation: &Invocation) -> String {
        match invocation.get("direction") {
            Some(direction) => format!("Go {direction}"),
            None => "Go somewhere".to_string(),
        }
    }

    fn combinations(&self, world: &World, actor: &str) -> Vec<Binding> {
        let Ok(location) = world.location_of(actor) else {
            return Vec::new();
        };
        location
            .connections
            .keys()
            .map(|direction| bind1("direction", direction.clone()))
            .collect()
    }

    fn check(&self, world: &World, actor: &str, invocation: &Invocation) -> EngineResult<Readiness> {
        let direction = invocation.operand("direction")?;
        let Some(direction) = Self::canonical_direction(world, actor, direction)? else {
            return Ok(Readiness::blocked(format!(
                "You can't go {direction} from here."
            )));
        };
        let location = world.location_of(actor)?;
        match location.exit(&direction) {
            Ok(Some(_)) => Ok(Readiness::Ready),
            Ok(None) => Ok(Readiness::blocked(format!(
                "You can't go {direction} from here."
            ))),
            Err(reason) => Ok(Readiness::blocked(reason.to_string())),
        }
    }

    fn apply(
        &self,
        world: &mut World,
        _registry: &ActionRegistry,
        actor: &str,
        invocation: &Invocation,
    ) -> EngineResult<ActionResult> {
        let direction = invocation.operand("direction")?;
        let Some(direction) = Self::canonical_direction(world, actor, direction)? else {
            return Ok(ActionResult::fail(format!(
                "You can't go {direction} from here."
            )));
        };
        let destination = {
            let location = world.location_of(actor)?;
            match location.exit(&direction) {
                Ok(Some(destination)) => destination.to_string(),
                Ok(None) => {
                    return Ok(ActionResult::fail(format!(
                        "You can't go {direction} from here."
                    )));
                }
                Err(reason) => return Ok(ActionResult::fail(reason.to_string())),
            }
        };
        world.move_character(actor, &destination)?;

        let arrived = world.location_of(actor)?;
        let narration = format!(
            "You go {direction}.\n\n{}",
            render_location(world, arrived, actor)
        );
        Ok(ActionResult::ok(narration)
            .with_state_change(format!("{actor}: moved {direction} to {destination}"))
            .with_event("moved".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::{Character, ExitBlock, Location, WorldMeta};

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
    }

    #[test]
    fn combinations_enumerate_exits() {
        let world = test_world();
        let combos = GoAction.combinations(&world, "alice");
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].get("direction").map(String::as_str), Some("north"));
    }

    #[test]
    fn missing_exit_is_blocked() {
        let world = test_world();
        let invocation = Invocation::new("go {direction}", bind1("direction", "west"));
        let readiness = GoAction.check(&world, "alice", &invocation).unwrap();
        assert!(matches!(readiness, Readiness::Blocked(_)));
    }

    #[test]
    fn blocked_exit_reports_block_description() {
        let mut world = test_world();
        world
            .location_mut("kitchen")
            .unwrap()
            .block_exit("north", ExitBlock::new("The pantry door is jammed."));
        let invocation = Invocation::new("go {direction}", bind1("direction", "north"));
        let readiness = GoAction.check(&world, "alice", &invocation).unwrap();
        assert_eq!(
            readiness,
            Readiness::Blocked("The pantry door is jammed.".to_string())
        );
    }

    #[test]
    fn apply_relocates_actor() {
        let mut world = test_world();
        let registry = ActionRegistry::standard();
        let invocation = Invocation::new("go {direction}", bind1("direction", "north"));
        let result = GoAction
            .apply(&mut world, &registry, "alice", &invocation)
            .unwrap();
        assert!(result.success);
        assert_eq!(world.character("alice").unwrap().location, "pantry");
        assert!(result.description.contains("pantry"));
    }
}
