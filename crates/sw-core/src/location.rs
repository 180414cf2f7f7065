//! Locations and their connections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::capability::Examinable;
use crate::item::Item;
use crate::prop::Prop;
use crate::result::ActionResult;
use crate::thing::Thing;

/// An optional barrier on one exit direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitBlock {
    /// Whether the block is currently in effect.
    pub active: bool,
    /// Narration shown when movement is refused.
    pub description: String,
}

impl ExitBlock {
    /// A currently-active block with the given refusal text.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            active: true,
            description: description.into(),
        }
    }
}

/// A place in the world. Connections are one-way: an exit exists in a
/// direction only if explicitly declared, and the reverse direction must
/// be declared on the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Shared entity data.
    pub thing: Thing,
    /// Direction label -> destination location name.
    pub connections: BTreeMap<String, String>,
    /// Loose items lying here, keyed by name.
    pub items: BTreeMap<String, Item>,
    /// Fixed scenery here, keyed by name.
    pub props: BTreeMap<String, Prop>,
    /// Direction label -> block, for exits that can be refused.
    pub blocks: BTreeMap<String, ExitBlock>,
}

impl Location {
    /// Create an empty location.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            thing: Thing::new(name),
            connections: BTreeMap::new(),
            items: BTreeMap::new(),
            props: BTreeMap::new(),
            blocks: BTreeMap::new(),
        }
    }

    /// The location's display name.
    pub fn name(&self) -> &str {
        &self.thing.name
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.thing.description = description.into();
        self
    }

    /// Declare a one-way exit.
    pub fn connect(&mut self, direction: impl Into<String>, destination: impl Into<String>) {
        self.connections.insert(direction.into(), destination.into());
    }

    /// Place a block on an exit direction.
    pub fn block_exit(&mut self, direction: impl Into<String>, block: ExitBlock) {
        self.blocks.insert(direction.into(), block);
    }

    /// The destination of an exit, unless the direction is blocked.
    /// Returns the block's refusal text on a blocked exit, and `Ok(None)`
    /// when no such exit exists.
    pub fn exit(&self, direction: &str) -> Result<Option<&str>, &str> {
        match self.connections.get(direction) {
            None => Ok(None),
            Some(destination) => match self.blocks.get(direction) {
                Some(block) if block.active => Err(block.description.as_str()),
                _ => Ok(Some(destination.as_str())),
            },
        }
    }

    /// Insert a loose item.
    pub fn insert_item(&mut self, item: Item) {
        self.items.insert(item.thing.name.clone(), item);
    }

    /// Remove a loose item by name, transferring ownership to the caller.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        self.items.remove(name)
    }

    /// Add a prop.
    pub fn insert_prop(&mut self, prop: Prop) {
        self.props.insert(prop.thing.name.clone(), prop);
    }
}

impl Examinable for Location {
    fn examine(&self) -> ActionResult {
        let text = if self.thing.description.is_empty() {
            format!("You are at {}.", self.name())
        } else {
            self.thing.description.clone()
        };
        ActionResult::ok(text)
    }
}
