//! Eating and drinking. Consumed items are destroyed.

use sw_core::{ActionResult, ConsumeKind, World, WorldError};

use super::bind1;
use crate::action::{ActionClass, Readiness};
use crate::binding::{Binding, Invocation};
use crate::error::EngineResult;
use crate::registry::ActionRegistry;

/// Consume a carried item; the generic "consume" verb accepts either kind.
fn verb_accepts(pattern: &str, kind: ConsumeKind) -> bool {
    match pattern.split(' ').next() {
        Some("eat") => kind == ConsumeKind::Eat,
        Some("drink") => kind == ConsumeKind::Drink,
        _ => true,
    }
}

/// Consume a carried item, removing it from the world.
#[derive(Debug, Clone, Copy)]
pub struct ConsumeAction;

impl ConsumeAction {
    fn carried<'w>(
        world: &'w World,
        actor: &str,
        raw: &str,
    ) -> EngineResult<Option<&'w sw_core::Item>> {
        let character = world
            .character(actor)
            .ok_or_else(|| WorldError::CharacterNotFound(actor.to_string()))?;
        Ok(character
            .inventory
            .values()
            .find(|item| item.name().eq_ignore_ascii_case(raw)))
    }
}

impl ActionClass for ConsumeAction {
    fn name(&self) -> &'static str {
        "consume"
    }

    fn command_patterns(&self) -> &'static [&'static str] {
        &["eat {item}", "drink {item}", "consume {item}"]
    }

    fn describe(&self, invocation: &Invocation) -> String {
        let item = invocation.get("item").unwrap_or("something");
        match invocation.pattern.split(' ').next() {
            Some("drink") => format!("Drink the {item}"),
            Some("eat") => format!("Eat the {item}"),
            _ => format!("Consume the {item}"),
        }
    }

    fn combinations(&self, world: &World, actor: &str) -> Vec<Binding> {
        let Some(character) = world.character(actor) else {
            return Vec::new();
        };
        character
            .inventory
            .values()
            .filter(|item| item.consumable.is_some())
            .map(|item| bind1("item", item.name()))
            .collect()
    }

    fn check(&self, world: &World, actor: &str, invocation: &Invocation) -> EngineResult<Readiness> {
        let raw = invocation.operand("item")?;
        let Some(item) = Self::carried(world, actor, raw)? else {
            return Ok(Readiness::blocked(format!(
                "You're not carrying any {raw}."
            )));
        };
        let name = item.name();
        let verb = invocation.pattern.split(' ').next().unwrap_or("consume");
        let Some(state) = &item.consumable else {
            return Ok(Readiness::blocked(format!("You can't {verb} the {name}.")));
        };
        if !verb_accepts(invocation.pattern, state.kind) {
            return Ok(Readiness::blocked(format!("You can't {verb} the {name}.")));
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
        let item = world.take_from_inventory(actor, raw)?;
        let state = item.consumable.as_ref().ok_or_else(|| {
            WorldError::Integrity(format!("{} passed check without consumable state", item.name()))
        })?;
        let narration = state
            .narration
            .clone()
            .unwrap_or_else(|| format!("You {} the {}.", state.kind.verb(), item.name()));
        Ok(ActionResult::ok(narration)
            .with_state_change(format!("{actor}: consumed {}", item.name()))
            .with_event("consumed".to_string()))
    }
}
