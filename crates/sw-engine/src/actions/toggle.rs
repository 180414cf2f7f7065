//! Two-state prop switches: open/close, lock/unlock, on/off.

use sw_core::{ActionResult, Prop, World, WorldError};

use super::bind1;
use crate::action::{ActionClass, Readiness};
use crate::binding::{Binding, Invocation};
use crate::error::EngineResult;
use crate::registry::ActionRegistry;
use crate::resolve::find_prop;

/// The state transition a toggle command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToggleKind {
    Open,
    Close,
    Lock,
    Unlock,
    TurnOn,
    TurnOff,
}

impl ToggleKind {
    /// The transition is encoded in the matched pattern's verb.
    fn of(pattern: &str) -> Option<Self> {
        let kind = match pattern.split(' ').next()? {
            "open" => Self::Open,
            "close" => Self::Close,
            "lock" => Self::Lock,
            "unlock" => Self::Unlock,
            "activate" => Self::TurnOn,
            "deactivate" => Self::TurnOff,
            "turn" if pattern.starts_with("turn on") => Self::TurnOn,
            "turn" if pattern.starts_with("turn off") => Self::TurnOff,
            _ => return None,
        };
        Some(kind)
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Close => "Close",
            Self::Lock => "Lock",
            Self::Unlock => "Unlock",
            Self::TurnOn => "Turn on",
            Self::TurnOff => "Turn off",
        }
    }
}

/// Flip a prop between its two-state capabilities.
#[derive(Debug, Clone, Copy)]
pub struct ToggleAction;

impl ToggleAction {
    fn kind(invocation: &Invocation) -> EngineResult<ToggleKind> {
        ToggleKind::of(invocation.pattern).ok_or_else(|| {
            WorldError::Integrity(format!(
                "no toggle transition for pattern \"{}\"",
                invocation.pattern
            ))
            .into()
        })
    }

    /// The key the lock demands, if the actor does not carry it.
    fn missing_key(world: &World, actor: &str, prop: &Prop) -> Option<String> {
        let key = prop.capabilities.lockable.as_ref()?.key.as_ref()?;
        let character = world.character(actor)?;
        let carried = character
            .inventory
            .keys()
            .any(|name| name.eq_ignore_ascii_case(key));
        if carried { None } else { Some(key.clone()) }
    }

    fn readiness(world: &World, actor: &str, prop: &Prop, kind: ToggleKind) -> Readiness {
        let name = prop.name();
        let caps = &prop.capabilities;
        match kind {
            ToggleKind::Open => {
                if caps.openable.is_none() {
                    return Readiness::blocked(format!("The {name} cannot be opened."));
                }
                if prop.is_locked() {
                    return Readiness::blocked(format!("The {name} is locked."));
                }
                if prop.is_open() {
                    return Readiness::blocked(format!("The {name} is already open."));
                }
            }
            ToggleKind::Close => {
                if caps.openable.is_none() {
                    return Readiness::blocked(format!("The {name} cannot be closed."));
                }
                if !prop.is_open() {
                    return Readiness::blocked(format!("The {name} is already closed."));
                }
            }
            ToggleKind::Lock => {
                if caps.lockable.is_none() {
                    return Readiness::blocked(format!("The {name} has no lock."));
                }
                if prop.is_open() && caps.openable.is_some() {
                    return Readiness::blocked(format!("Close the {name} before locking it."));
                }
                if prop.is_locked() {
                    return Readiness::blocked(format!("The {name} is already locked."));
                }
                if let Some(key) = Self::missing_key(world, actor, prop) {
                    return Readiness::blocked(format!("You need the {key}."));
                }
            }
            ToggleKind::Unlock => {
                if caps.lockable.is_none() {
                    return Readiness::blocked(format!("The {name} has no lock."));
                }
                if !prop.is_locked() {
                    return Readiness::blocked(format!("The {name} is not locked."));
                }
                if let Some(key) = Self::missing_key(world, actor, prop) {
                    return Readiness::blocked(format!("You need the {key}."));
                }
            }
            ToggleKind::TurnOn => match &caps.activatable {
                None => {
                    return Readiness::blocked(format!("The {name} cannot be turned on."));
                }
                Some(state) if state.active => {
                    return Readiness::blocked(format!("The {name} is already on."));
                }
                Some(_) => {}
            },
            ToggleKind::TurnOff => match &caps.activatable {
                None => {
                    return Readiness::blocked(format!("The {name} cannot be turned off."));
                }
                Some(state) if !state.active => {
                    return Readiness::blocked(format!("The {name} is already off."));
                }
                Some(_) => {}
            },
        }
        Readiness::Ready
    }
}

impl ActionClass for ToggleAction {
    fn name(&self) -> &'static str {
        "toggle"
    }

    fn command_patterns(&self) -> &'static [&'static str] {
        &[
            "open {target}",
            "close {target}",
            "lock {target}",
            "unlock {target}",
            "turn on {target}",
            "turn off {target}",
            "activate {target}",
            "deactivate {target}",
        ]
    }

    fn describe(&self, invocation: &Invocation) -> String {
        let target = invocation.get("target").unwrap_or("it");
        match ToggleKind::of(invocation.pattern) {
            Some(kind) => format!("{} the {target}", kind.verb()),
            None => format!("Toggle the {target}"),
        }
    }

    fn combinations(&self, world: &World, actor: &str) -> Vec<Binding> {
        let Ok(location) = world.location_of(actor) else {
            return Vec::new();
        };
        location
            .props
            .values()
            .filter(|p| {
                let caps = &p.capabilities;
                caps.openable.is_some() || caps.lockable.is_some() || caps.activatable.is_some()
            })
            .map(|p| bind1("target", p.name()))
            .collect()
    }

    fn check(&self, world: &World, actor: &str, invocation: &Invocation) -> EngineResult<Readiness> {
        let kind = Self::kind(invocation)?;
        let raw = invocation.operand("target")?;
        let Some(target) = find_prop(world, actor, raw) else {
            return Ok(Readiness::blocked(format!("You don't see any {raw} here.")));
        };
        let location = world.location_of(actor)?;
        let prop = location
            .props
            .get(&target)
            .ok_or_else(|| WorldError::PropNotFound(target.clone()))?;
        Ok(Self::readiness(world, actor, prop, kind))
    }

    fn apply(
        &self,
        world: &mut World,
        _registry: &ActionRegistry,
        actor: &str,
        invocation: &Invocation,
    ) -> EngineResult<ActionResult> {
        let kind = Self::kind(invocation)?;
        if let Readiness::Blocked(reason) = self.check(world, actor, invocation)? {
            return Ok(ActionResult::fail(reason));
        }
        let raw = invocation.operand("target")?;
        let target = find_prop(world, actor, raw)
            .ok_or_else(|| WorldError::PropNotFound(raw.to_string()))?;
        let location = world.location_of(actor)?.name().to_string();
        let prop = world.prop_mut(&location, &target)?;
        let result = match kind {
            ToggleKind::Open => prop.open(),
            ToggleKind::Close => prop.close(),
            ToggleKind::Lock => prop.lock(),
            ToggleKind::Unlock => prop.unlock(),
            ToggleKind::TurnOn => prop.activate(),
            ToggleKind::TurnOff => prop.deactivate(),
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::{Character, Item, Location, Prop, WorldMeta};

    fn test_world() -> World {
        let mut world = World::new(WorldMeta::new("Test"));
        world.add_location(Location::new("cellar")).unwrap();
        world
            .add_character(Character::new("alice", "cellar"))
            .unwrap();
        world
            .add_prop(
                "cellar",
                Prop::new("strongbox")
                    .with_openable()
                    .with_lockable(Some("brass key".to_string()))
                    .with_container(),
            )
            .unwrap();
        world
            .add_prop("cellar", Prop::new("lantern").with_activatable())
            .unwrap();
        world
    }

    fn lock_strongbox(world: &mut World) {
        let prop = world.prop_mut("cellar", "strongbox").unwrap();
        prop.capabilities.lockable.as_mut().unwrap().locked = true;
    }

    #[test]
    fn kind_follows_the_pattern_verb() {
        assert_eq!(ToggleKind::of("open {target}"), Some(ToggleKind::Open));
        assert_eq!(ToggleKind::of("turn on {target}"), Some(ToggleKind::TurnOn));
        assert_eq!(
            ToggleKind::of("deactivate {target}"),
            Some(ToggleKind::TurnOff)
        );
        assert_eq!(ToggleKind::of("take {item}"), None);
    }

    #[test]
    fn open_blocked_while_locked() {
        let mut world = test_world();
        lock_strongbox(&mut world);
        let invocation = Invocation::new("open {target}", bind1("target", "strongbox"));
        let readiness = ToggleAction.check(&world, "alice", &invocation).unwrap();
        assert_eq!(
            readiness,
            Readiness::Blocked("The strongbox is locked.".to_string())
        );
    }

    #[test]
    fn unlock_requires_the_key_in_inventory() {
        let mut world = test_world();
        lock_strongbox(&mut world);
        let invocation = Invocation::new("unlock {target}", bind1("target", "strongbox"));
        let readiness = ToggleAction.check(&world, "alice", &invocation).unwrap();
        assert_eq!(
            readiness,
            Readiness::Blocked("You need the brass key.".to_string())
        );

        world.add_item("cellar", Item::new("brass key")).unwrap();
        world
            .item_to_inventory("cellar", "brass key", "alice")
            .unwrap();
        let readiness = ToggleAction.check(&world, "alice", &invocation).unwrap();
        assert_eq!(readiness, Readiness::Ready);
    }

    #[test]
    fn open_then_close_round() {
        let mut world = test_world();
        let registry = ActionRegistry::standard();
        let open = Invocation::new("open {target}", bind1("target", "strongbox"));
        let result = ToggleAction
            .apply(&mut world, &registry, "alice", &open)
            .unwrap();
        assert!(result.success);
        assert!(world.location("cellar").unwrap().props["strongbox"].is_open());

        let result = ToggleAction
            .apply(&mut world, &registry, "alice", &open)
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.description, "The strongbox is already open.");

        let close = Invocation::new("close {target}", bind1("target", "strongbox"));
        let result = ToggleAction
            .apply(&mut world, &registry, "alice", &close)
            .unwrap();
        assert!(result.success);
    }

    #[test]
    fn lock_requires_closed_door() {
        let mut world = test_world();
        world.add_item("cellar", Item::new("brass key")).unwrap();
        world
            .item_to_inventory("cellar", "brass key", "alice")
            .unwrap();
        world.prop_mut("cellar", "strongbox").unwrap().open();
        let invocation = Invocation::new("lock {target}", bind1("target", "strongbox"));
        let readiness = ToggleAction.check(&world, "alice", &invocation).unwrap();
        assert_eq!(
            readiness,
            Readiness::Blocked("Close the strongbox before locking it.".to_string())
        );
    }

    #[test]
    fn power_toggles() {
        let mut world = test_world();
        let registry = ActionRegistry::standard();
        let on = Invocation::new("turn on {target}", bind1("target", "lantern"));
        let result = ToggleAction
            .apply(&mut world, &registry, "alice", &on)
            .unwrap();
        assert!(result.success);

        let off = Invocation::new("turn off {target}", bind1("target", "lantern"));
        let result = ToggleAction
            .apply(&mut world, &registry, "alice", &off)
            .unwrap();
        assert!(result.success);
        assert_eq!(result.description, "You turn off the lantern.");
    }
}
