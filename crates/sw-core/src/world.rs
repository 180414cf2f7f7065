//! The central world model. Owns all locations and characters.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::error::{WorldError, WorldResult};
use crate::item::Item;
use crate::location::Location;
use crate::prop::Prop;

/// Metadata about the world itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Display name of the world.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Version of the serialized layout, bumped on incompatible change.
    pub schema_version: u32,
    /// Timestamp when the world was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the world was last modified.
    pub updated_at: DateTime<Utc>,
}

impl WorldMeta {
    /// Create metadata for a freshly-built world.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: String::new(),
            schema_version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The world graph: locations (which own items and props) and characters
/// (which own their inventories and stand at exactly one location).
///
/// Character presence at a location is derived from `Character::location`
/// rather than stored twice, so relocation can never leave the two sides
/// disagreeing. Items are values owned by exactly one holder map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Metadata about the world.
    pub meta: WorldMeta,
    locations: BTreeMap<String, Location>,
    characters: BTreeMap<String, Character>,
}

fn find_key<'a, V>(map: &'a BTreeMap<String, V>, name: &str) -> Option<&'a str> {
    map.keys()
        .find(|k| k.eq_ignore_ascii_case(name))
        .map(String::as_str)
}

impl World {
    /// Create an empty world.
    pub fn new(meta: WorldMeta) -> Self {
        Self {
            meta,
            locations: BTreeMap::new(),
            characters: BTreeMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Name uniqueness
    // -----------------------------------------------------------------------

    /// Whether any entity in the world already carries this name
    /// (case-insensitive). Covers locations, characters, props, and items
    /// in every holder.
    pub fn name_in_use(&self, name: &str) -> bool {
        if find_key(&self.locations, name).is_some() || find_key(&self.characters, name).is_some() {
            return true;
        }
        for location in self.locations.values() {
            if find_key(&location.items, name).is_some()
                || find_key(&location.props, name).is_some()
            {
                return true;
            }
            for prop in location.props.values() {
                let in_container = prop
                    .capabilities
                    .container
                    .as_ref()
                    .is_some_and(|c| find_key(&c.items, name).is_some());
                if in_container {
                    return true;
                }
            }
        }
        self.characters
            .values()
            .any(|c| find_key(&c.inventory, name).is_some())
    }

    fn reserve_name(&self, name: &str) -> WorldResult<()> {
        if self.name_in_use(name) {
            return Err(WorldError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // World building
    // -----------------------------------------------------------------------

    /// Add a location.
    pub fn add_location(&mut self, location: Location) -> WorldResult<()> {
        self.reserve_name(location.name())?;
        self.locations.insert(location.name().to_string(), location);
        self.touch();
        Ok(())
    }

    /// Add a character. Its location must already exist.
    pub fn add_character(&mut self, character: Character) -> WorldResult<()> {
        self.reserve_name(character.name())?;
        if find_key(&self.locations, &character.location).is_none() {
            return Err(WorldError::LocationNotFound(character.location.clone()));
        }
        self.characters
            .insert(character.name().to_string(), character);
        self.touch();
        Ok(())
    }

    /// Place a loose item at a location.
    pub fn add_item(&mut self, location: &str, item: Item) -> WorldResult<()> {
        self.reserve_name(item.name())?;
        self.location_mut(location)?.insert_item(item);
        self.touch();
        Ok(())
    }

    /// Add a prop to a location.
    pub fn add_prop(&mut self, location: &str, prop: Prop) -> WorldResult<()> {
        self.reserve_name(prop.name())?;
        self.location_mut(location)?.insert_prop(prop);
        self.touch();
        Ok(())
    }

    /// Place an item inside a container prop.
    pub fn add_item_to_container(
        &mut self,
        location: &str,
        prop: &str,
        item: Item,
    ) -> WorldResult<()> {
        self.reserve_name(item.name())?;
        let prop = self.prop_mut(location, prop)?;
        let prop_name = prop.name().to_string();
        let container = prop
            .capabilities
            .container
            .as_mut()
            .ok_or_else(|| WorldError::Integrity(format!("{prop_name} is not a container")))?;
        container.insert(item);
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.meta.updated_at = Utc::now();
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Find a location by name (case-insensitive).
    pub fn location(&self, name: &str) -> Option<&Location> {
        find_key(&self.locations, name).and_then(|k| self.locations.get(k))
    }

    /// Find a location by name, as an error-carrying lookup.
    pub fn location_mut(&mut self, name: &str) -> WorldResult<&mut Location> {
        let key = find_key(&self.locations, name)
            .map(str::to_string)
            .ok_or_else(|| WorldError::LocationNotFound(name.to_string()))?;
        self.locations
            .get_mut(&key)
            .ok_or(WorldError::LocationNotFound(key))
    }

    /// Find a character by name (case-insensitive).
    pub fn character(&self, name: &str) -> Option<&Character> {
        find_key(&self.characters, name).and_then(|k| self.characters.get(k))
    }

    /// Find a character by name, mutably.
    pub fn character_mut(&mut self, name: &str) -> WorldResult<&mut Character> {
        let key = find_key(&self.characters, name)
            .map(str::to_string)
            .ok_or_else(|| WorldError::CharacterNotFound(name.to_string()))?;
        self.characters
            .get_mut(&key)
            .ok_or(WorldError::CharacterNotFound(key))
    }

    /// The location an actor currently stands at.
    pub fn location_of(&self, actor: &str) -> WorldResult<&Location> {
        let character = self
            .character(actor)
            .ok_or_else(|| WorldError::CharacterNotFound(actor.to_string()))?;
        self.location(&character.location).ok_or_else(|| {
            WorldError::Integrity(format!(
                "character \"{actor}\" stands at missing location \"{}\"",
                character.location
            ))
        })
    }

    /// A prop at a location, mutably.
    pub fn prop_mut(&mut self, location: &str, prop: &str) -> WorldResult<&mut Prop> {
        let location = self.location_mut(location)?;
        let key = find_key(&location.props, prop)
            .map(str::to_string)
            .ok_or_else(|| WorldError::PropNotFound(prop.to_string()))?;
        location
            .props
            .get_mut(&key)
            .ok_or(WorldError::PropNotFound(key))
    }

    /// Characters currently standing at a location (derived, sorted by name).
    pub fn characters_at(&self, location: &str) -> Vec<&Character> {
        self.characters
            .values()
            .filter(|c| c.location.eq_ignore_ascii_case(location))
            .collect()
    }

    /// All locations, in name order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// All characters, in name order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    // -----------------------------------------------------------------------
    // Item movement. Each primitive fully applies or not at all.
    // -----------------------------------------------------------------------

    /// Move a loose item from a location into a character's inventory.
    pub fn item_to_inventory(&mut self, location: &str, item: &str, actor: &str) -> WorldResult<()> {
        let actor_key = find_key(&self.characters, actor)
            .map(str::to_string)
            .ok_or_else(|| WorldError::CharacterNotFound(actor.to_string()))?;
        if !self.characters[&actor_key].has_inventory_room() {
            return Err(WorldError::Integrity(format!(
                "inventory of \"{actor_key}\" is full"
            )));
        }
        let item_key = {
            let location = self.location_mut(location)?;
            find_key(&location.items, item)
                .map(str::to_string)
                .ok_or_else(|| WorldError::ItemNotFound(item.to_string()))?
        };
        let taken = self
            .location_mut(location)?
            .remove_item(&item_key)
            .ok_or(WorldError::ItemNotFound(item_key))?;
        let character = self.character_mut(&actor_key)?;
        match character.receive_item(taken) {
            Ok(_) => {
                self.touch();
                Ok(())
            }
            // Room was checked above; put the item back rather than lose it.
            Err(returned) => {
                self.location_mut(location)?.insert_item(*returned);
                Err(WorldError::Integrity(format!(
                    "inventory of \"{actor_key}\" is full"
                )))
            }
        }
    }

    /// Move an item from a character's inventory onto the floor of the
    /// character's current location.
    pub fn item_to_location(&mut self, actor: &str, item: &str) -> WorldResult<()> {
        let location_name = self.location_of(actor)?.name().to_string();
        let item = self.take_from_inventory(actor, item)?;
        self.location_mut(&location_name)?.insert_item(item);
        self.touch();
        Ok(())
    }

    /// Move an item from a character's inventory into a container prop at
    /// the character's current location.
    pub fn item_to_container(&mut self, actor: &str, item: &str, prop: &str) -> WorldResult<()> {
        let location_name = self.location_of(actor)?.name().to_string();
        {
            // Validate the container before touching the inventory.
            let target = self.prop_mut(&location_name, prop)?;
            if target.capabilities.container.is_none() {
                return Err(WorldError::Integrity(format!(
                    "{} is not a container",
                    target.name()
                )));
            }
        }
        let item = self.take_from_inventory(actor, item)?;
        let target = self.prop_mut(&location_name, prop)?;
        if let Some(container) = target.capabilities.container.as_mut() {
            container.insert(item);
        }
        self.touch();
        Ok(())
    }

    /// Move an item out of a container prop into a character's inventory.
    pub fn item_from_container(&mut self, actor: &str, item: &str, prop: &str) -> WorldResult<()> {
        let location_name = self.location_of(actor)?.name().to_string();
        let actor_key = find_key(&self.characters, actor)
            .map(str::to_string)
            .ok_or_else(|| WorldError::CharacterNotFound(actor.to_string()))?;
        if !self.characters[&actor_key].has_inventory_room() {
            return Err(WorldError::Integrity(format!(
                "inventory of \"{actor_key}\" is full"
            )));
        }
        let taken = {
            let target = self.prop_mut(&location_name, prop)?;
            let target_name = target.name().to_string();
            let container = target
                .capabilities
                .container
                .as_mut()
                .ok_or_else(|| WorldError::Integrity(format!("{target_name} is not a container")))?;
            let key = find_key(&container.items, item)
                .map(str::to_string)
                .ok_or_else(|| WorldError::ItemNotFound(item.to_string()))?;
            container
                .remove(&key)
                .ok_or(WorldError::ItemNotFound(key))?
        };
        let character = self.character_mut(&actor_key)?;
        match character.receive_item(taken) {
            Ok(_) => {
                self.touch();
                Ok(())
            }
            Err(returned) => {
                let target = self.prop_mut(&location_name, prop)?;
                if let Some(container) = target.capabilities.container.as_mut() {
                    container.insert(*returned);
                }
                Err(WorldError::Integrity(format!(
                    "inventory of \"{actor_key}\" is full"
                )))
            }
        }
    }

    /// Hand an item from one character to another. Both must exist; the
    /// receiver's inventory bound is respected.
    pub fn transfer_item(&mut self, giver: &str, item: &str, receiver: &str) -> WorldResult<()> {
        let receiver_key = find_key(&self.characters, receiver)
            .map(str::to_string)
            .ok_or_else(|| WorldError::CharacterNotFound(receiver.to_string()))?;
        if !self.characters[&receiver_key].has_inventory_room() {
            return Err(WorldError::Integrity(format!(
                "inventory of \"{receiver_key}\" is full"
            )));
        }
        let item = self.take_from_inventory(giver, item)?;
        let receiver = self.character_mut(&receiver_key)?;
        match receiver.receive_item(item) {
            Ok(_) => {
                self.touch();
                Ok(())
            }
            Err(returned) => {
                // Undo: hand it back to the giver.
                let giver = self.character_mut(giver)?;
                let _ = giver.receive_item(*returned);
                Err(WorldError::Integrity(format!(
                    "inventory of \"{receiver_key}\" is full"
                )))
            }
        }
    }

    /// Remove an item from a character's inventory entirely (consumption),
    /// transferring ownership to the caller.
    pub fn take_from_inventory(&mut self, actor: &str, item: &str) -> WorldResult<Item> {
        let character = self.character_mut(actor)?;
        let key = find_key(&character.inventory, item)
            .map(str::to_string)
            .ok_or_else(|| WorldError::ItemNotFound(item.to_string()))?;
        let item = character
            .give_item(&key)
            .ok_or(WorldError::ItemNotFound(key))?;
        self.touch();
        Ok(item)
    }

    // -----------------------------------------------------------------------
    // Character movement
    // -----------------------------------------------------------------------

    /// Relocate a character to a named location. Presence at the previous
    /// location ends implicitly because presence is derived.
    pub fn move_character(&mut self, actor: &str, destination: &str) -> WorldResult<()> {
        let destination = find_key(&self.locations, destination)
            .map(str::to_string)
            .ok_or_else(|| WorldError::LocationNotFound(destination.to_string()))?;
        let character = self.character_mut(actor)?;
        character.location = destination;
        self.touch();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Integrity
    // -----------------------------------------------------------------------

    /// Verify every mandatory reference: each character stands at an
    /// existing location, each connection points at an existing location,
    /// and no two entities share a name. Name uniqueness is enforced on
    /// every insertion, but a deserialized world arrives with its maps
    /// pre-filled, so the load path re-checks it here.
    pub fn integrity_check(&self) -> WorldResult<()> {
        fn claim(seen: &mut BTreeSet<String>, name: &str) -> WorldResult<()> {
            if !seen.insert(name.to_lowercase()) {
                return Err(WorldError::Integrity(format!(
                    "the name \"{name}\" belongs to more than one entity"
                )));
            }
            Ok(())
        }

        let mut seen = BTreeSet::new();
        for location in self.locations.values() {
            claim(&mut seen, location.name())?;
            for name in location.items.keys() {
                claim(&mut seen, name)?;
            }
            for prop in location.props.values() {
                claim(&mut seen, prop.name())?;
                if let Some(container) = &prop.capabilities.container {
                    for name in container.items.keys() {
                        claim(&mut seen, name)?;
                    }
                }
            }
        }
        for character in self.characters.values() {
            claim(&mut seen, character.name())?;
            for name in character.inventory.keys() {
                claim(&mut seen, name)?;
            }
        }

        for character in self.characters.values() {
            if find_key(&self.locations, &character.location).is_none() {
                return Err(WorldError::Integrity(format!(
                    "character \"{}\" stands at missing location \"{}\"",
                    character.name(),
                    character.location
                )));
            }
        }
        for location in self.locations.values() {
            for (direction, destination) in &location.connections {
                if find_key(&self.locations, destination).is_none() {
                    return Err(WorldError::Integrity(format!(
                        "exit \"{direction}\" of \"{}\" leads to missing location \"{destination}\"",
                        location.name()
                    )));
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Number of locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of characters.
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Every item name together with the name of its current holder.
    /// Used to verify ownership exclusivity in tests and validation.
    pub fn item_holders(&self) -> Vec<(String, String)> {
        let mut holders = Vec::new();
        for location in self.locations.values() {
            for item in location.items.keys() {
                holders.push((item.clone(), location.name().to_string()));
            }
            for prop in location.props.values() {
                if let Some(container) = &prop.capabilities.container {
                    for item in container.items.keys() {
                        holders.push((item.clone(), prop.name().to_string()));
                    }
                }
            }
        }
        for character in self.characters.values() {
            for item in character.inventory.keys() {
                holders.push((item.clone(), character.name().to_string()));
            }
        }
        holders
    }
}
