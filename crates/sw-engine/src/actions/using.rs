//! Exclusive occupancy of usable props.

use sw_core::{ActionResult, World, WorldError};

use super::bind1;
use crate::action::{ActionClass, Readiness};
use crate::binding::{Binding, Invocation};
use crate::error::EngineResult;
use crate::registry::ActionRegistry;
use crate::resolve::find_prop;

/// Claim a usable prop for the actor, or release it again.
#[derive(Debug, Clone, Copy)]
pub struct UseAction;

impl UseAction {
    fn releasing(invocation: &Invocation) -> bool {
        invocation.pattern.starts_with("stop using")
    }
}

impl ActionClass for UseAction {
    fn name(&self) -> &'static str {
        "use"
    }

    fn command_patterns(&self) -> &'static [&'static str] {
        &["stop using {target}", "start using {target}", "use {target}"]
    }

    fn describe(&self, invocation: &Invocation) -> String {
        let target = invocation.get("target").unwrap_or("it");
        if Self::releasing(invocation) {
            format!("Stop using the {target}")
        } else {
            format!("Use the {target}")
        }
    }

    fn combinations(&self, world: &World, actor: &str) -> Vec<Binding> {
        let Ok(location) = world.location_of(actor) else {
            return Vec::new();
        };
        location
            .props
            .values()
            .filter(|p| p.capabilities.usable.is_some())
            .map(|p| bind1("target", p.name()))
            .collect()
    }

    fn check(&self, world: &World, actor: &str, invocation: &Invocation) -> EngineResult<Readiness> {
        let raw = invocation.operand("target")?;
        let Some(target) = find_prop(world, actor, raw) else {
            return Ok(Readiness::blocked(format!("You don't see any {raw} here.")));
        };
        let location = world.location_of(actor)?;
        let prop = location
            .props
            .get(&target)
            .ok_or_else(|| WorldError::PropNotFound(target.clone()))?;
        let Some(state) = &prop.capabilities.usable else {
            return Ok(Readiness::blocked(format!(
                "The {target} cannot be used that way."
            )));
        };

        if Self::releasing(invocation) {
            return Ok(match &state.in_use_by {
                Some(user) if user == actor => Readiness::Ready,
                Some(user) => Readiness::blocked(format!("{user} is using the {target}, not you.")),
                None => Readiness::blocked(format!("You are not using the {target}.")),
            });
        }
        Ok(match &state.in_use_by {
            None => Readiness::Ready,
            Some(user) if user == actor => {
                Readiness::blocked(format!("You are already using the {target}."))
            }
            Some(user) => Readiness::blocked(format!("{user} is already using the {target}.")),
        })
    }

    fn apply(
        &self,
        world: &mut World,
        _registry: &ActionRegistry,
        actor: &str,
        invocation: &Invocation,
    ) -> EngineResult<ActionResult> {
        if let Readiness::Blocked(reason) = self.check(world, actor, invocation)? {
            return Ok(ActionResult::fail(reason));
        }
        let raw = invocation.operand("target")?;
        let target = find_prop(world, actor, raw)
            .ok_or_else(|| WorldError::PropNotFound(raw.to_string()))?;
        let location = world.location_of(actor)?.name().to_string();
        let prop = world.prop_mut(&location, &target)?;
        let result = if Self::releasing(invocation) {
            prop.stop_use(actor)
        } else {
            prop.start_use(actor)
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::{Character, Location, Prop, WorldMeta};

    fn test_world() -> World {
        let mut world = World::new(WorldMeta::new("Test"));
        world.add_location(Location::new("study")).unwrap();
        world
            .add_character(Character::new("alice", "study"))
            .unwrap();
        world
            .add_character(Character::new("bob", "study"))
            .unwrap();
        world
            .add_prop("study", Prop::new("armchair").with_usable())
            .unwrap();
        world
    }

    #[test]
    fn use_claims_the_prop_exclusively() {
        let mut world = test_world();
        let registry = ActionRegistry::standard();
        let invocation = Invocation::new("use {target}", bind1("target", "armchair"));
        let result = UseAction
            .apply(&mut world, &registry, "alice", &invocation)
            .unwrap();
        assert!(result.success);

        let readiness = UseAction.check(&world, "bob", &invocation).unwrap();
        assert_eq!(
            readiness,
            Readiness::Blocked("alice is already using the armchair.".to_string())
        );
    }

    #[test]
    fn only_the_user_can_release() {
        let mut world = test_world();
        let registry = ActionRegistry::standard();
        let start = Invocation::new("use {target}", bind1("target", "armchair"));
        UseAction
            .apply(&mut world, &registry, "alice", &start)
            .unwrap();

        let stop = Invocation::new("stop using {target}", bind1("target", "armchair"));
        let readiness = UseAction.check(&world, "bob", &stop).unwrap();
        assert!(matches!(readiness, Readiness::Blocked(_)));

        let result = UseAction
            .apply(&mut world, &registry, "alice", &stop)
            .unwrap();
        assert!(result.success);
        let state = world.location("study").unwrap().props["armchair"]
            .capabilities
            .usable
            .clone()
            .unwrap();
        assert!(state.in_use_by.is_none());
    }

    #[test]
    fn stop_without_start_is_blocked() {
        let world = test_world();
        let stop = Invocation::new("stop using {target}", bind1("target", "armchair"));
        let readiness = UseAction.check(&world, "alice", &stop).unwrap();
        assert_eq!(
            readiness,
            Readiness::Blocked("You are not using the armchair.".to_string())
        );
    }
}
