//! Portable items.

use serde::{Deserialize, Serialize};

use crate::capability::{Capability, ConsumableState, Examinable};
use crate::result::ActionResult;
use crate::thing::Thing;

/// A portable object. An item is a value owned by exactly one holder at a
/// time: a location's items, a character's inventory, or a container prop's
/// inventory. Actions move items by removing the value from one holder and
/// inserting it into another, so the exclusivity invariant cannot be
/// violated without losing the item entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Shared entity data.
    pub thing: Thing,
    /// Whether a character may pick this item up.
    pub gettable: bool,
    /// Text shown when the item is examined.
    pub examine_text: String,
    /// Consumable capability state, if this item can be eaten or drunk.
    pub consumable: Option<ConsumableState>,
}

impl Item {
    /// Create a gettable item.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            thing: Thing::new(name),
            gettable: true,
            examine_text: String::new(),
            consumable: None,
        }
    }

    /// The item's display name.
    pub fn name(&self) -> &str {
        &self.thing.name
    }

    /// Set the gettable flag.
    pub fn with_gettable(mut self, gettable: bool) -> Self {
        self.gettable = gettable;
        self
    }

    /// Set the examine text.
    pub fn with_examine_text(mut self, text: impl Into<String>) -> Self {
        self.examine_text = text.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.thing.description = description.into();
        self
    }

    /// Mark the item consumable.
    pub fn with_consumable(mut self, state: ConsumableState) -> Self {
        self.consumable = Some(state);
        self
    }

    /// Report the union of this item's capabilities.
    pub fn capabilities(&self) -> Vec<Capability> {
        let mut caps = vec![Capability::Examinable];
        if self.consumable.is_some() {
            caps.push(Capability::Consumable);
        }
        caps
    }

    /// Check whether this item implements a capability.
    pub fn has_capability(&self, cap: Capability) -> bool {
        self.capabilities().contains(&cap)
    }
}

impl Examinable for Item {
    fn examine(&self) -> ActionResult {
        let text = if !self.examine_text.is_empty() {
            self.examine_text.clone()
        } else if !self.thing.description.is_empty() {
            self.thing.description.clone()
        } else {
            format!("You see nothing special about the {}.", self.name())
        };
        ActionResult::ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::ConsumeKind;

    #[test]
    fn builder_sets_fields() {
        let item = Item::new("apple")
            .with_examine_text("A crisp red apple.")
            .with_consumable(ConsumableState::new(ConsumeKind::Eat));
        assert!(item.gettable);
        assert_eq!(item.examine_text, "A crisp red apple.");
        assert!(item.has_capability(Capability::Consumable));
        assert!(item.has_capability(Capability::Examinable));
    }

    #[test]
    fn examine_falls_back_to_default() {
        let item = Item::new("pebble");
        let result = item.examine();
        assert!(result.success);
        assert!(result.description.contains("nothing special"));
    }

    #[test]
    fn examine_prefers_examine_text() {
        let item = Item::new("apple")
            .with_description("an apple")
            .with_examine_text("A crisp red apple.");
        assert_eq!(item.examine().description, "A crisp red apple.");
    }
}
