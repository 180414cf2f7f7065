//! Capability contracts: the named interfaces an entity may implement.
//!
//! A capability is advertised by attaching its state at construction time
//! (see [`crate::prop::CapabilitySet`]) rather than by inheritance. Every
//! capability operation is a no-op on failure: it returns `success=false`
//! with an explanation and leaves the state unchanged.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::result::ActionResult;

/// The set of named capability interfaces, for introspection and UI use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Can be opened and closed.
    Openable,
    /// Can be locked and unlocked.
    Lockable,
    /// Can be turned on and off.
    Activatable,
    /// Can be started and stopped being used.
    Usable,
    /// Holds a nested inventory of items.
    Container,
    /// Can be eaten or drunk, removing it from the world.
    Consumable,
    /// Can be examined for a closer description.
    Examinable,
    /// Can receive items from another character.
    Recipient,
    /// Can hand items to another character.
    Giver,
    /// Can hold a conversation (consumed by external collaborators).
    Conversational,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Openable => write!(f, "openable"),
            Self::Lockable => write!(f, "lockable"),
            Self::Activatable => write!(f, "activatable"),
            Self::Usable => write!(f, "usable"),
            Self::Container => write!(f, "container"),
            Self::Consumable => write!(f, "consumable"),
            Self::Examinable => write!(f, "examinable"),
            Self::Recipient => write!(f, "recipient"),
            Self::Giver => write!(f, "giver"),
            Self::Conversational => write!(f, "conversational"),
        }
    }
}

/// A read-only closer look. Implemented by every entity type; never mutates.
pub trait Examinable {
    /// Describe this entity in detail.
    fn examine(&self) -> ActionResult;
}

/// State for the Openable capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenState {
    /// Whether the entity is currently open.
    pub open: bool,
}

impl OpenState {
    /// Open the entity. Fails without mutating if already open.
    pub fn open(&mut self, name: &str) -> ActionResult {
        if self.open {
            return ActionResult::fail(format!("The {name} is already open."));
        }
        self.open = true;
        ActionResult::ok(format!("You open the {name}."))
            .with_state_change(format!("{name}: closed -> open"))
    }

    /// Close the entity. Fails without mutating if already closed.
    pub fn close(&mut self, name: &str) -> ActionResult {
        if !self.open {
            return ActionResult::fail(format!("The {name} is already closed."));
        }
        self.open = false;
        ActionResult::ok(format!("You close the {name}."))
            .with_state_change(format!("{name}: open -> closed"))
    }
}

/// State for the Lockable capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockState {
    /// Whether the entity is currently locked.
    pub locked: bool,
    /// Name of the item required to lock or unlock, if any. The engine's
    /// toggle action checks the acting character's inventory for it.
    pub key: Option<String>,
}

impl LockState {
    /// Lock the entity. Fails without mutating if already locked.
    pub fn lock(&mut self, name: &str) -> ActionResult {
        if self.locked {
            return ActionResult::fail(format!("The {name} is already locked."));
        }
        self.locked = true;
        ActionResult::ok(format!("You lock the {name}."))
            .with_state_change(format!("{name}: unlocked -> locked"))
    }

    /// Unlock the entity. Fails without mutating if already unlocked.
    pub fn unlock(&mut self, name: &str) -> ActionResult {
        if !self.locked {
            return ActionResult::fail(format!("The {name} is not locked."));
        }
        self.locked = false;
        ActionResult::ok(format!("You unlock the {name}."))
            .with_state_change(format!("{name}: locked -> unlocked"))
    }
}

/// State for the Activatable capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerState {
    /// Whether the entity is currently active.
    pub active: bool,
}

impl PowerState {
    /// Turn the entity on. Fails without mutating if already on.
    pub fn activate(&mut self, name: &str) -> ActionResult {
        if self.active {
            return ActionResult::fail(format!("The {name} is already on."));
        }
        self.active = true;
        ActionResult::ok(format!("You turn on the {name}."))
            .with_state_change(format!("{name}: off -> on"))
    }

    /// Turn the entity off. Fails without mutating if already off.
    pub fn deactivate(&mut self, name: &str) -> ActionResult {
        if !self.active {
            return ActionResult::fail(format!("The {name} is already off."));
        }
        self.active = false;
        ActionResult::ok(format!("You turn off the {name}."))
            .with_state_change(format!("{name}: on -> off"))
    }
}

/// State for the Usable capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UseState {
    /// Name of the character currently using the entity, if any.
    pub in_use_by: Option<String>,
}

impl UseState {
    /// Start using the entity. Fails without mutating if occupied.
    pub fn start_use(&mut self, name: &str, actor: &str) -> ActionResult {
        if let Some(user) = &self.in_use_by {
            if user == actor {
                return ActionResult::fail(format!("You are already using the {name}."));
            }
            return ActionResult::fail(format!("{user} is already using the {name}."));
        }
        self.in_use_by = Some(actor.to_string());
        ActionResult::ok(format!("You start using the {name}."))
            .with_state_change(format!("{name}: in use by {actor}"))
    }

    /// Stop using the entity. Fails without mutating if the actor is not
    /// the current user.
    pub fn stop_use(&mut self, name: &str, actor: &str) -> ActionResult {
        match &self.in_use_by {
            Some(user) if user == actor => {
                self.in_use_by = None;
                ActionResult::ok(format!("You stop using the {name}."))
                    .with_state_change(format!("{name}: no longer in use"))
            }
            Some(user) => ActionResult::fail(format!("{user} is using the {name}, not you.")),
            None => ActionResult::fail(format!("You are not using the {name}.")),
        }
    }
}

/// State for the Container capability: a nested, exclusively-owned
/// item inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerState {
    /// Items held inside, keyed by name.
    pub items: BTreeMap<String, Item>,
}

impl ContainerState {
    /// Insert an item. The caller must have removed it from its previous
    /// holder; exclusive ownership is preserved by moving the value.
    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.thing.name.clone(), item);
    }

    /// Remove an item by name, transferring ownership to the caller.
    pub fn remove(&mut self, name: &str) -> Option<Item> {
        self.items.remove(name)
    }
}

/// What kind of consumption an item supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumeKind {
    /// Solid food; matched by "eat".
    Eat,
    /// A liquid; matched by "drink".
    Drink,
}

impl ConsumeKind {
    /// The verb that narrates this kind of consumption.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Eat => "eat",
            Self::Drink => "drink",
        }
    }
}

/// State for the Consumable capability on items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumableState {
    /// The kind of consumption this item supports.
    pub kind: ConsumeKind,
    /// Optional narration used instead of the default template.
    pub narration: Option<String>,
}

impl ConsumableState {
    /// A consumable of the given kind with the default narration.
    pub fn new(kind: ConsumeKind) -> Self {
        Self {
            kind,
            narration: None,
        }
    }
}

/// State for the Conversational capability on characters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Topic -> reply. Consumed by external collaborators (LLM prompt
    /// builders, dialogue UIs); the engine only reports the capability.
    pub topics: BTreeMap<String, String>,
}
