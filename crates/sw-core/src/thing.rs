//! Shared entity data: name, description, properties, command hints.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A flexible property value that supports common scalar types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A text value.
    String(String),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Data shared by every entity in the world.
///
/// `Thing` is embedded in [`crate::item::Item`], [`crate::prop::Prop`],
/// [`crate::character::Character`], and [`crate::location::Location`]
/// rather than inherited; the entity types compose it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    /// Display name. Unique world-wide, case-insensitive.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Arbitrary key-value properties. Unset keys read as a caller-supplied
    /// default via [`Thing::property_or`] and [`Thing::flag`].
    pub properties: BTreeMap<String, PropertyValue>,
    /// Free-text command hints for UI and non-human actors.
    pub command_hints: Vec<String>,
}

impl Thing {
    /// Create a named thing with an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            properties: BTreeMap::new(),
            command_hints: Vec::new(),
        }
    }

    /// Create a named, described thing.
    pub fn described(name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut thing = Self::new(name);
        thing.description = description.into();
        thing
    }

    /// Set a property value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Read a property, falling back to `default` when the key is unset.
    pub fn property_or<'a>(&'a self, key: &str, default: &'a PropertyValue) -> &'a PropertyValue {
        self.properties.get(key).unwrap_or(default)
    }

    /// Read a boolean property, falling back to `default` when the key is
    /// unset or holds a non-boolean value.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.properties.get(key) {
            Some(PropertyValue::Boolean(b)) => *b,
            _ => default,
        }
    }

    /// Add a command hint.
    pub fn add_hint(&mut self, hint: impl Into<String>) {
        self.command_hints.push(hint.into());
    }
}
