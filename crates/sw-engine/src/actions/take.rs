//! Picking things up and putting them down.

use sw_core::{ActionResult, World};

use super::{bind1, bind2};
use crate::action::{ActionClass, Readiness};
use crate::binding::{Binding, Invocation};
use crate::error::EngineResult;
use crate::registry::ActionRegistry;
use crate::resolve::{find_prop, find_visible_item, FoundItem, ItemPlace};

/// Pick up a loose item, or fetch one out of an open container.
#[derive(Debug, Clone, Copy)]
pub struct TakeAction;

impl TakeAction {
    fn locate(
        world: &World,
        actor: &str,
        invocation: &Invocation,
    ) -> EngineResult<Result<FoundItem, String>> {
        let raw = invocation.operand("item")?;
        if let Some(container_raw) = invocation.get("container") {
            let Some(container) = find_prop(world, actor, container_raw) else {
                return Ok(Err(format!("You don't see any {container_raw} here.")));
            };
            let location = world.location_of(actor)?;
            let Some(prop) = location.props.get(&container) else {
                return Ok(Err(format!("You don't see any {container_raw} here.")));
            };
            if !prop.container_accessible() {
                return Ok(Err(format!("The {container} is closed.")));
            }
            let Some(item) = prop
                .contents()
                .find(|i| i.name().eq_ignore_ascii_case(raw))
            else {
                return Ok(Err(format!(
                    "There is no {raw} in the {container}."
                )));
            };
            return Ok(Ok(FoundItem {
                name: item.name().to_string(),
                place: ItemPlace::Container(container),
            }));
        }

        match find_visible_item(world, actor, raw) {
            Some(found) => Ok(Ok(found)),
            None => Ok(Err(format!("You don't see any {raw} here."))),
        }
    }
}

impl ActionClass for TakeAction {
    fn name(&self) -> &'static str {
        "take"
    }

    fn command_patterns(&self) -> &'static [&'static str] {
        // Two-operand forms first, so "take key from chest" never binds
        // "key from chest" as a single item name.
        &[
            "take {item} from {container}",
            "get {item} from {container}",
            "take {item}",
            "get {item}",
            "pick up {item}",
            "grab {item}",
        ]
    }

    fn describe(&self, invocation: &Invocation) -> String {
        match (invocation.get("item"), invocation.get("container")) {
            (Some(item), Some(container)) => {
                format!("Take the {item} from the {container}")
            }
            (Some(item), None) => format!("Pick up the {item}"),
            _ => "Pick something up".to_string(),
        }
    }

    fn combinations(&self, world: &World, actor: &str) -> Vec<Binding> {
        let Ok(location) = world.location_of(actor) else {
            return Vec::new();
        };
        let mut combos: Vec<Binding> = location
            .items
            .keys()
            .map(|item| bind1("item", item.clone()))
            .collect();
        for prop in location.props.values().filter(|p| p.container_accessible()) {
            for item in prop.contents() {
                combos.push(bind2("item", item.name(), "container", prop.name()));
            }
        }
        combos
    }

    fn check(&self, world: &World, actor: &str, invocation: &Invocation) -> EngineResult<Readiness> {
        let found = match Self::locate(world, actor, invocation)? {
            Ok(found) => found,
            Err(reason) => return Ok(Readiness::blocked(reason)),
        };
        if found.place == ItemPlace::Inventory {
            return Ok(Readiness::blocked(format!(
                "You're already carrying the {}.",
                found.name
            )));
        }
        if let ItemPlace::Floor = found.place {
            let location = world.location_of(actor)?;
            let gettable = location
                .items
                .get(&found.name)
                .is_some_and(|item| item.gettable);
            if !gettable {
                return Ok(Readiness::blocked(format!(
                    "You can't take the {}.",
                    found.name
                )));
            }
        }
        let character = world
            .character(actor)
            .ok_or_else(|| sw_core::WorldError::CharacterNotFound(actor.to_string()))?;
        if character.inventory.len() >= character.max_inventory {
            return Ok(Readiness::blocked(
                "You're carrying too much already.".to_string(),
            ));
        }
        Ok(Readiness::Ready)
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
        let found = match Self::locate(world, actor, invocation)? {
            Ok(found) => found,
            Err(reason) => return Ok(ActionResult::fail(reason)),
        };
        match &found.place {
            ItemPlace::Floor => {
                let location = world.location_of(actor)?.name().to_string();
                world.item_to_inventory(&location, &found.name, actor)?;
                Ok(ActionResult::ok(format!("You take the {}.", found.name))
                    .with_state_change(format!("{actor}: took {}", found.name)))
            }
            ItemPlace::Container(container) => {
                world.item_from_container(actor, &found.name, container)?;
                Ok(ActionResult::ok(format!(
                    "You take the {} from the {container}.",
                    found.name
                ))
                .with_state_change(format!("{actor}: took {} from {container}", found.name)))
            }
            ItemPlace::Inventory => Ok(ActionResult::fail(format!(
                "You're already carrying the {}.",
                found.name
            ))),
        }
    }
}

/// Put down a carried item at the current location.
#[derive(Debug, Clone, Copy)]
pub struct DropAction;

impl ActionClass for DropAction {
    fn name(&self) -> &'static str {
        "drop"
    }

    fn command_patterns(&self) -> &'static [&'static str] {
        &["drop {item}", "put down {item}"]
    }

    fn describe(&self, invocation: &Invocation) -> String {
        match invocation.get("item") {
            Some(item) => format!("Put down the {item}"),
            None => "Put something down".to_string(),
        }
    }

    fn combinations(&self, world: &World, actor: &str) -> Vec<Binding> {
        let Some(character) = world.character(actor) else {
            return Vec::new();
        };
        character
            .inventory
            .keys()
            .map(|item| bind1("item", item.clone()))
            .collect()
    }

    fn check(&self, world: &World, actor: &str, invocation: &Invocation) -> EngineResult<Readiness> {
        let raw = invocation.operand("item")?;
        let character = world
            .character(actor)
            .ok_or_else(|| sw_core::WorldError::CharacterNotFound(actor.to_string()))?;
        let carried = character
            .inventory
            .keys()
            .any(|name| name.eq_ignore_ascii_case(raw));
        if carried {
            Ok(Readiness::Ready)
        } else {
            Ok(Readiness::blocked(format!(
                "You're not carrying any {raw}."
            )))
        }
    }

    fn apply(
        &self,
        world: &mut World,
        _registry: &ActionRegistry,
        actor: &str,
        invocation: &Invocation,
    ) -> EngineResult<ActionResult> {
        let raw = invocation.operand("item")?;
        if let Readiness::Blocked(reason) = self.check(world, actor, invocation)? {
            return Ok(ActionResult::fail(reason));
        }
        world.item_to_location(actor, raw)?;
        Ok(ActionResult::ok(format!("You put down the {raw}."))
            .with_state_change(format!("{actor}: dropped {raw}")))
    }
}
