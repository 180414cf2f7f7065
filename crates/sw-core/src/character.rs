//! Characters: the actors of the world.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::capability::{Capability, ConversationState, Examinable};
use crate::item::Item;
use crate::result::ActionResult;
use crate::thing::Thing;

/// Default inventory bound when none is given.
pub const DEFAULT_MAX_INVENTORY: usize = 10;

/// A person or creature. Every character stands at exactly one location;
/// a character with no valid location is an integrity error caught by
/// [`crate::world::World::integrity_check`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Shared entity data.
    pub thing: Thing,
    /// Free-text persona, used only by external collaborators.
    pub persona: String,
    /// Items carried, keyed by name. Bounded by `max_inventory`.
    pub inventory: BTreeMap<String, Item>,
    /// Upper bound on inventory size.
    pub max_inventory: usize,
    /// Name of the location this character currently stands at.
    pub location: String,
    /// Conversational capability state.
    pub conversation: ConversationState,
}

impl Character {
    /// Create a character at the named location.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            thing: Thing::new(name),
            persona: String::new(),
            inventory: BTreeMap::new(),
            max_inventory: DEFAULT_MAX_INVENTORY,
            location: location.into(),
            conversation: ConversationState::default(),
        }
    }

    /// The character's display name.
    pub fn name(&self) -> &str {
        &self.thing.name
    }

    /// Set the persona text.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// Set the inventory bound.
    pub fn with_max_inventory(mut self, max: usize) -> Self {
        self.max_inventory = max;
        self
    }

    /// Whether the inventory has room for one more item.
    pub fn has_inventory_room(&self) -> bool {
        self.inventory.len() < self.max_inventory
    }

    /// Whether the character carries the named item.
    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.contains_key(name)
    }

    /// Receive an item (the Recipient capability). Fails without mutating
    /// when the inventory is full; the item is returned to the caller,
    /// boxed to keep the error variant small.
    pub fn receive_item(&mut self, item: Item) -> Result<ActionResult, Box<Item>> {
        if !self.has_inventory_room() {
            return Err(Box::new(item));
        }
        let item_name = item.thing.name.clone();
        self.inventory.insert(item_name.clone(), item);
        Ok(ActionResult::ok(format!(
            "{} takes the {item_name}.",
            self.name()
        ))
        .with_state_change(format!("{item_name}: given to {}", self.name())))
    }

    /// Hand over an item (the Giver capability), transferring ownership to
    /// the caller. Returns `None` if the item is not carried.
    pub fn give_item(&mut self, name: &str) -> Option<Item> {
        self.inventory.remove(name)
    }

    /// Report the union of this character's capabilities.
    pub fn capabilities(&self) -> Vec<Capability> {
        vec![
            Capability::Examinable,
            Capability::Recipient,
            Capability::Giver,
            Capability::Conversational,
        ]
    }

    /// Check whether this character implements a capability.
    pub fn has_capability(&self, cap: Capability) -> bool {
        self.capabilities().contains(&cap)
    }
}

impl Examinable for Character {
    fn examine(&self) -> ActionResult {
        let text = if self.thing.description.is_empty() {
            format!("{} looks unremarkable.", self.name())
        } else {
            self.thing.description.clone()
        };
        ActionResult::ok(text)
    }
}
