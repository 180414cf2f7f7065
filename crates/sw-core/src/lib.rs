//! Core types for Spielwelt: entities, capabilities, and the world model.
//!
//! This crate defines the data model the engine operates on. Entities are
//! plain structs composing a shared [`Thing`]; behavior contracts are
//! capability states attached at construction plus the [`Examinable`]
//! trait. You can construct a [`World`] programmatically or deserialize
//! one from JSON.

/// Capability contracts and their state types.
pub mod capability;
/// Characters: the actors of the world.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Portable items.
pub mod item;
/// Locations and their connections.
pub mod location;
/// Fixed scenery props.
pub mod prop;
/// The uniform action-result value type.
pub mod result;
/// Shared entity data and property bags.
pub mod thing;
/// The central world model.
pub mod world;

/// Re-export capability types.
pub use capability::{
    Capability, ConsumableState, ConsumeKind, ContainerState, ConversationState, Examinable,
    LockState, OpenState, PowerState, UseState,
};
/// Re-export the character type.
pub use character::Character;
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export the item type.
pub use item::Item;
/// Re-export location types.
pub use location::{ExitBlock, Location};
/// Re-export prop types.
pub use prop::{CapabilitySet, Prop};
/// Re-export the action-result type.
pub use result::ActionResult;
/// Re-export shared entity data types.
pub use thing::{PropertyValue, Thing};
/// Re-export world model types.
pub use world::{World, WorldMeta};
