//! Close inspection of things in scope.

use sw_core::{ActionResult, Examinable, World};

use super::bind1;
use crate::action::{ActionClass, Readiness};
use crate::binding::{Binding, Invocation};
use crate::error::EngineResult;
use crate::registry::ActionRegistry;
use crate::resolve::{find_visible_item, ItemPlace};

/// Inspect an item, prop, character, or the location itself.
#[derive(Debug, Clone, Copy)]
pub struct ExamineAction;

impl ExamineAction {
    /// Resolve and examine, in the same priority order discovery uses:
    /// items before props before characters before the location.
    fn run(world: &World, actor: &str, raw: &str) -> EngineResult<Option<ActionResult>> {
        if let Some(found) = find_visible_item(world, actor, raw) {
            let character = world.character(actor);
            let location = world.location_of(actor)?;
            let item = match &found.place {
                ItemPlace::Inventory => {
                    character.and_then(|c| c.inventory.get(&found.name))
                }
                ItemPlace::Floor => location.items.get(&found.name),
                ItemPlace::Container(container) => location
                    .props
                    .get(container)
                    .and_then(|p| p.contents().find(|i| i.name() == found.name)),
            };
            return Ok(item.map(Examinable::examine));
        }
        let location = world.location_of(actor)?;
        if let Some(prop) = crate::resolve::find_prop(world, actor, raw) {
            return Ok(location.props.get(&prop).map(Examinable::examine));
        }
        if let Some(name) = crate::resolve::find_present_character(world, actor, raw) {
            return Ok(world.character(&name).map(Examinable::examine));
        }
        if location.name().eq_ignore_ascii_case(raw) {
            return Ok(Some(location.examine()));
        }
        Ok(None)
    }
}

impl ActionClass for ExamineAction {
    fn name(&self) -> &'static str {
        "examine"
    }

    fn command_patterns(&self) -> &'static [&'static str] {
        &[
            "examine {target}",
            "look at {target}",
            "inspect {target}",
            "x {target}",
        ]
    }

    fn ends_turn(&self) -> bool {
        false
    }

    fn describe(&self, invocation: &Invocation) -> String {
        match invocation.get("target") {
            Some(target) => format!("Examine the {target}"),
            None => "Examine something".to_string(),
        }
    }

    fn combinations(&self, world: &World, actor: &str) -> Vec<Binding> {
        let Some(character) = world.character(actor) else {
            return Vec::new();
        };
        let Ok(location) = world.location_of(actor) else {
            return Vec::new();
        };
        let mut combos = Vec::new();
        for name in character.inventory.keys() {
            combos.push(bind1("target", name.clone()));
        }
        for name in location.items.keys() {
            combos.push(bind1("target", name.clone()));
        }
        for prop in location.props.values() {
            combos.push(bind1("target", prop.name()));
            if prop.container_accessible() {
                for item in prop.contents() {
                    combos.push(bind1("target", item.name()));
                }
            }
        }
        for other in world.characters_at(location.name()) {
            if !other.name().eq_ignore_ascii_case(actor) {
                combos.push(bind1("target", other.name()));
            }
        }
        combos
    }

    fn check(&self, world: &World, actor: &str, invocation: &Invocation) -> EngineResult<Readiness> {
        let raw = invocation.operand("target")?;
        match crate::resolve::find_examinable(world, actor, raw) {
            Some(_) => Ok(Readiness::Ready),
            None => Ok(Readiness::blocked(format!(
                "You don't see any {raw} here."
            ))),
        }
    }

    fn apply(
        &self,
        world: &mut World,
        _registry: &ActionRegistry,
        actor: &str,
        invocation: &Invocation,
    ) -> EngineResult<ActionResult> {
        let raw = invocation.operand("target")?;
        match Self::run(world, actor, raw)? {
            Some(result) => Ok(result),
            None => Ok(ActionResult::fail(format!("You don't see any {raw} here."))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::{Character, Item, Location, Prop, WorldMeta};

    fn test_world() -> World {
        let mut world = World::new(WorldMeta::new("Test"));
        world.add_location(Location::new("kitchen")).unwrap();
        world
            .add_character(Character::new("alice", "kitchen"))
            .unwrap();
        world
            .add_item(
                "kitchen",
                Item::new("apple").with_examine_text("A crisp red apple."),
            )
            .unwrap();
        world
            .add_prop("kitchen", Prop::new("stove").with_activatable())
            .unwrap();
        world
    }

    #[test]
    fn examine_does_not_end_turn() {
        assert!(!ExamineAction.ends_turn());
    }

    #[test]
    fn examine_reports_the_examine_text() {
        let mut world = test_world();
        let registry = ActionRegistry::standard();
        let invocation = Invocation::new("examine {target}", bind1("target", "apple"));
        let result = ExamineAction
            .apply(&mut world, &registry, "alice", &invocation)
            .unwrap();
        assert!(result.success);
        assert!(result.description.contains("A crisp red apple."));
    }

    #[test]
    fn combinations_cover_items_and_props() {
        let world = test_world();
        let combos = ExamineAction.combinations(&world, "alice");
        let targets: Vec<&str> = combos
            .iter()
            .filter_map(|b| b.get("target").map(String::as_str))
            .collect();
        assert!(targets.contains(&"apple"));
        assert!(targets.contains(&"stove"));
    }

    #[test]
    fn unknown_target_is_blocked() {
        let world = test_world();
        let invocation = Invocation::new("examine {target}", bind1("target", "ghost"));
        let readiness = ExamineAction.check(&world, "alice", &invocation).unwrap();
        assert_eq!(
            readiness,
            Readiness::Blocked("You don't see any ghost here.".to_string())
        );
    }
}
