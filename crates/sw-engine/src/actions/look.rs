//! Surveying the current location.

use std::fmt::Write as _;

use sw_core::{ActionResult, Location, World};

use crate::action::{ActionClass, Readiness};
use crate::binding::{Binding, Invocation};
use crate::discovery::enumerate;
use crate::error::EngineResult;
use crate::registry::ActionRegistry;

/// Render the standard description of a location as seen by `actor`.
///
/// Shared between looking around and arriving somewhere new.
pub(crate) fn render_location(world: &World, location: &Location, actor: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "**{}**", location.thing.name);
    if !location.thing.description.is_empty() {
        let _ = writeln!(out, "{}", location.thing.description);
    }

    for prop in location.props.values() {
        let _ = writeln!(out, "There is {} here.", prop.thing.name);
    }
    for item in location.items.values() {
        let _ = writeln!(out, "You see {} here.", item.thing.name);
    }
    for other in world.characters_at(location.name()) {
        if !other.name().eq_ignore_ascii_case(actor) {
            let _ = writeln!(out, "{} is here.", other.name());
        }
    }

    if location.connections.is_empty() {
        let _ = write!(out, "There are no obvious exits.");
    } else {
        let exits: Vec<&str> = location.connections.keys().map(String::as_str).collect();
        let _ = write!(out, "Exits: {}", exits.join(", "));
    }
    out
}

/// Survey the current location and list everything that can be done there.
#[derive(Debug, Clone, Copy)]
pub struct LookAction;

impl ActionClass for LookAction {
    fn name(&self) -> &'static str {
        "look"
    }

    fn command_patterns(&self) -> &'static [&'static str] {
        &["look around", "look"]
    }

    fn ends_turn(&self) -> bool {
        false
    }

    fn describe(&self, _invocation: &Invocation) -> String {
        "Look around".to_string()
    }

    fn combinations(&self, _world: &World, _actor: &str) -> Vec<Binding> {
        vec![Binding::new()]
    }

    fn check(
        &self,
        world: &World,
        actor: &str,
        _invocation: &Invocation,
    ) -> EngineResult<Readiness> {
        world.location_of(actor)?;
        Ok(Readiness::Ready)
    }

    fn apply(
        &self,
        world: &mut World,
        registry: &ActionRegistry,
        actor: &str,
        _invocation: &Invocation,
    ) -> EngineResult<ActionResult> {
        let location = world.location_of(actor)?;
        let mut out = render_location(world, location, actor);

        let available = enumerate(world, registry, actor)?;
        if !available.is_empty() {
            out.push_str("\n\nYou could:");
            for action in &available {
                let _ = write!(out, "\n  {} ({})", action.description, action.command);
            }
        }
        Ok(ActionResult::ok(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::{Character, Item, WorldMeta};

    fn test_world() -> World {
        let mut world = World::new(WorldMeta::new("Test"));
        let mut kitchen = Location::new("kitchen");
        kitchen.thing.description = "A warm kitchen.".to_string();
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
        world
    }

    #[test]
    fn render_mentions_items_characters_and_exits() {
        let world = test_world();
        let location = world.location("kitchen").unwrap();
        let text = render_location(&world, location, "alice");
        assert!(text.starts_with("**kitchen**"));
        assert!(text.contains("A warm kitchen."));
        assert!(text.contains("You see apple here."));
        assert!(text.contains("bob is here."));
        assert!(!text.contains("alice is here."));
        assert!(text.contains("Exits: north"));
    }

    #[test]
    fn look_does_not_end_turn() {
        assert!(!LookAction.ends_turn());
    }

    #[test]
    fn apply_lists_available_actions() {
        let mut world = test_world();
        let registry = ActionRegistry::standard();
        let invocation = Invocation::new("look", Binding::new());
        let result = LookAction
            .apply(&mut world, &registry, "alice", &invocation)
            .unwrap();
        assert!(result.success);
        assert!(result.description.contains("You could:"));
        assert!(result.description.contains("take apple"));
    }
}
