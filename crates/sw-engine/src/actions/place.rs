//! Handing carried items over, to containers or to other characters.

use sw_core::{ActionResult, World, WorldError};

use super::bind2;
use crate::action::{ActionClass, Readiness};
use crate::binding::{Binding, Invocation};
use crate::error::EngineResult;
use crate::registry::ActionRegistry;
use crate::resolve::{find_present_character, find_prop};

/// Put a carried item into a container, or give it to someone present.
#[derive(Debug, Clone, Copy)]
pub struct PlaceAction;

impl PlaceAction {
    fn carried(world: &World, actor: &str, raw: &str) -> EngineResult<Option<String>> {
        let character = world
            .character(actor)
            .ok_or_else(|| WorldError::CharacterNotFound(actor.to_string()))?;
        Ok(character
            .inventory
            .keys()
            .find(|name| name.eq_ignore_ascii_case(raw))
            .cloned())
    }
}

impl ActionClass for PlaceAction {
    fn name(&self) -> &'static str {
        "place"
    }

    fn command_patterns(&self) -> &'static [&'static str] {
        &[
            "put {item} in {container}",
            "place {item} in {container}",
            "give {item} to {character}",
        ]
    }

    fn describe(&self, invocation: &Invocation) -> String {
        let item = invocation.get("item").unwrap_or("something");
        if let Some(container) = invocation.get("container") {
            format!("Put the {item} in the {container}")
        } else if let Some(character) = invocation.get("character") {
            format!("Give the {item} to {character}")
        } else {
            format!("Hand the {item} over")
        }
    }

    fn combinations(&self, world: &World, actor: &str) -> Vec<Binding> {
        let Some(character) = world.character(actor) else {
            return Vec::new();
        };
        let Ok(location) = world.location_of(actor) else {
            return Vec::new();
        };

        let containers: Vec<&str> = location
            .props
            .values()
            .filter(|p| p.container_accessible())
            .map(|p| p.name())
            .collect();
        let others: Vec<&str> = world
            .characters_at(location.name())
            .into_iter()
            .map(|c| c.name())
            .filter(|n| !n.eq_ignore_ascii_case(actor))
            .collect();

        let mut combos = Vec::new();
        for item in character.inventory.keys() {
            for container in &containers {
                combos.push(bind2("item", item.clone(), "container", *container));
            }
            for other in &others {
                combos.push(bind2("item", item.clone(), "character", *other));
            }
        }
        combos
    }

    fn check(&self, world: &World, actor: &str, invocation: &Invocation) -> EngineResult<Readiness> {
        let raw = invocation.operand("item")?;
        if Self::carried(world, actor, raw)?.is_none() {
            return Ok(Readiness::blocked(format!(
                "You're not carrying any {raw}."
            )));
        }

        if let Some(container_raw) = invocation.get("container") {
            let Some(container) = find_prop(world, actor, container_raw) else {
                return Ok(Readiness::blocked(format!(
                    "You don't see any {container_raw} here."
                )));
            };
            let location = world.location_of(actor)?;
            let prop = location.props.get(&container).ok_or_else(|| {
                WorldError::PropNotFound(container.clone())
            })?;
            if prop.capabilities.container.is_none() {
                return Ok(Readiness::blocked(format!(
                    "The {container} can't hold anything."
                )));
            }
            if !prop.container_accessible() {
                return Ok(Readiness::blocked(format!("The {container} is closed.")));
            }
            return Ok(Readiness::Ready);
        }

        let receiver_raw = invocation.operand("character")?;
        let Some(receiver) = find_present_character(world, actor, receiver_raw) else {
            return Ok(Readiness::blocked(format!(
                "{receiver_raw} isn't here."
            )));
        };
        let receiver = world
            .character(&receiver)
            .ok_or_else(|| WorldError::CharacterNotFound(receiver.clone()))?;
        if receiver.inventory.len() >= receiver.max_inventory {
            return Ok(Readiness::blocked(format!(
                "{} can't carry any more.",
                receiver.name()
            )));
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
        let raw = invocation.operand("item")?;
        let item = Self::carried(world, actor, raw)?.ok_or_else(|| {
            WorldError::ItemNotFound(raw.to_string())
        })?;

        if let Some(container_raw) = invocation.get("container") {
            let container = find_prop(world, actor, container_raw)
                .ok_or_else(|| WorldError::PropNotFound(container_raw.to_string()))?;
            world.item_to_container(actor, &item, &container)?;
            return Ok(ActionResult::ok(format!(
                "You put the {item} in the {container}."
            ))
            .with_state_change(format!("{actor}: put {item} in {container}")));
        }

        let receiver_raw = invocation.operand("character")?;
        let receiver = find_present_character(world, actor, receiver_raw)
            .ok_or_else(|| WorldError::CharacterNotFound(receiver_raw.to_string()))?;
        world.transfer_item(actor, &item, &receiver)?;
        Ok(
            ActionResult::ok(format!("You give the {item} to {receiver}."))
                .with_state_change(format!("{actor}: gave {item} to {receiver}")),
        )
    }
}
