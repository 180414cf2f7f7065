//! Fixed scenery props: sinks, beds, cabinets.

use serde::{Deserialize, Serialize};

use crate::capability::{
    Capability, ContainerState, Examinable, LockState, OpenState, PowerState, UseState,
};
use crate::item::Item;
use crate::result::ActionResult;
use crate::thing::Thing;

/// The capability states attached to a prop at construction time.
///
/// Attaching a state advertises the corresponding capability; there is no
/// separate registration step. This is the explicit-satisfaction
/// alternative to the source material's runtime method reflection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilitySet {
    /// Openable state, if the prop can be opened and closed.
    pub openable: Option<OpenState>,
    /// Lockable state, if the prop can be locked.
    pub lockable: Option<LockState>,
    /// Activatable state, if the prop can be turned on and off.
    pub activatable: Option<PowerState>,
    /// Usable state, if the prop can be occupied by a character.
    pub usable: Option<UseState>,
    /// Container state, if the prop holds a nested item inventory.
    pub container: Option<ContainerState>,
}

/// A fixed piece of scenery. Never gettable; the concrete home of most
/// capability interfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    /// Shared entity data.
    pub thing: Thing,
    /// Capability states advertised by this prop.
    pub capabilities: CapabilitySet,
}

impl Prop {
    /// Create a prop with no capabilities.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            thing: Thing::new(name),
            capabilities: CapabilitySet::default(),
        }
    }

    /// The prop's display name.
    pub fn name(&self) -> &str {
        &self.thing.name
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.thing.description = description.into();
        self
    }

    /// Attach Openable state (closed by default).
    pub fn with_openable(mut self) -> Self {
        self.capabilities.openable = Some(OpenState::default());
        self
    }

    /// Attach Lockable state (unlocked by default, optionally keyed).
    pub fn with_lockable(mut self, key: Option<String>) -> Self {
        self.capabilities.lockable = Some(LockState { locked: false, key });
        self
    }

    /// Attach Activatable state (off by default).
    pub fn with_activatable(mut self) -> Self {
        self.capabilities.activatable = Some(PowerState::default());
        self
    }

    /// Attach Usable state (unoccupied by default).
    pub fn with_usable(mut self) -> Self {
        self.capabilities.usable = Some(UseState::default());
        self
    }

    /// Attach Container state (empty by default).
    pub fn with_container(mut self) -> Self {
        self.capabilities.container = Some(ContainerState::default());
        self
    }

    /// Report the union of this prop's capabilities.
    pub fn capabilities(&self) -> Vec<Capability> {
        let set = &self.capabilities;
        let mut caps = vec![Capability::Examinable];
        if set.openable.is_some() {
            caps.push(Capability::Openable);
        }
        if set.lockable.is_some() {
            caps.push(Capability::Lockable);
        }
        if set.activatable.is_some() {
            caps.push(Capability::Activatable);
        }
        if set.usable.is_some() {
            caps.push(Capability::Usable);
        }
        if set.container.is_some() {
            caps.push(Capability::Container);
        }
        caps
    }

    /// Check whether this prop implements a capability.
    pub fn has_capability(&self, cap: Capability) -> bool {
        self.capabilities().contains(&cap)
    }

    /// Whether the prop is currently open. Props without Openable state
    /// count as open, so a shelf-like container is always accessible.
    pub fn is_open(&self) -> bool {
        self.capabilities
            .openable
            .as_ref()
            .is_none_or(|s| s.open)
    }

    /// Whether the prop is currently locked.
    pub fn is_locked(&self) -> bool {
        self.capabilities
            .lockable
            .as_ref()
            .is_some_and(|s| s.locked)
    }

    /// Whether the nested container inventory can be reached right now.
    pub fn container_accessible(&self) -> bool {
        self.capabilities.container.is_some() && self.is_open()
    }

    /// Open the prop. Honors the lock: a locked prop will not open.
    pub fn open(&mut self) -> ActionResult {
        let name = self.thing.name.clone();
        if self.is_locked() {
            return ActionResult::fail(format!("The {name} is locked."));
        }
        match self.capabilities.openable.as_mut() {
            Some(state) => state.open(&name),
            None => ActionResult::fail(format!("The {name} cannot be opened.")),
        }
    }

    /// Close the prop.
    pub fn close(&mut self) -> ActionResult {
        let name = self.thing.name.clone();
        match self.capabilities.openable.as_mut() {
            Some(state) => state.close(&name),
            None => ActionResult::fail(format!("The {name} cannot be closed.")),
        }
    }

    /// Lock the prop. An open prop must be closed first.
    pub fn lock(&mut self) -> ActionResult {
        let name = self.thing.name.clone();
        if self.is_open() && self.capabilities.openable.is_some() {
            return ActionResult::fail(format!("Close the {name} before locking it."));
        }
        match self.capabilities.lockable.as_mut() {
            Some(state) => state.lock(&name),
            None => ActionResult::fail(format!("The {name} has no lock.")),
        }
    }

    /// Unlock the prop.
    pub fn unlock(&mut self) -> ActionResult {
        let name = self.thing.name.clone();
        match self.capabilities.lockable.as_mut() {
            Some(state) => state.unlock(&name),
            None => ActionResult::fail(format!("The {name} has no lock.")),
        }
    }

    /// Turn the prop on.
    pub fn activate(&mut self) -> ActionResult {
        let name = self.thing.name.clone();
        match self.capabilities.activatable.as_mut() {
            Some(state) => state.activate(&name),
            None => ActionResult::fail(format!("The {name} cannot be turned on.")),
        }
    }

    /// Turn the prop off.
    pub fn deactivate(&mut self) -> ActionResult {
        let name = self.thing.name.clone();
        match self.capabilities.activatable.as_mut() {
            Some(state) => state.deactivate(&name),
            None => ActionResult::fail(format!("The {name} cannot be turned off.")),
        }
    }

    /// Start using the prop.
    pub fn start_use(&mut self, actor: &str) -> ActionResult {
        let name = self.thing.name.clone();
        match self.capabilities.usable.as_mut() {
            Some(state) => state.start_use(&name, actor),
            None => ActionResult::fail(format!("The {name} cannot be used that way.")),
        }
    }

    /// Stop using the prop.
    pub fn stop_use(&mut self, actor: &str) -> ActionResult {
        let name = self.thing.name.clone();
        match self.capabilities.usable.as_mut() {
            Some(state) => state.stop_use(&name, actor),
            None => ActionResult::fail(format!("The {name} cannot be used that way.")),
        }
    }

    /// Items inside the container, if this prop has one.
    pub fn contents(&self) -> impl Iterator<Item = &Item> {
        self.capabilities
            .container
            .iter()
            .flat_map(|c| c.items.values())
    }
}

impl Examinable for Prop {
    fn examine(&self) -> ActionResult {
        let mut text = if self.thing.description.is_empty() {
            format!("You see nothing special about the {}.", self.name())
        } else {
            self.thing.description.clone()
        };

        if let Some(state) = &self.capabilities.openable {
            if state.open {
                let names: Vec<&str> = self.contents().map(Item::name).collect();
                if names.is_empty() {
                    text.push_str(" It is open and empty.");
                } else {
                    text.push_str(&format!(" Inside you see: {}.", names.join(", ")));
                }
            } else {
                text.push_str(" It is closed.");
            }
        }
        if let Some(state) = &self.capabilities.activatable {
            text.push_str(if state.active {
                " It is on."
            } else {
                " It is off."
            });
        }

        ActionResult::ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closet() -> Prop {
        Prop::new("closet")
            .with_description("A narrow wooden closet.")
            .with_openable()
            .with_container()
    }

    #[test]
    fn capabilities_union() {
        let prop = closet();
        assert!(prop.has_capability(Capability::Openable));
        assert!(prop.has_capability(Capability::Container));
        assert!(prop.has_capability(Capability::Examinable));
        assert!(!prop.has_capability(Capability::Activatable));
    }

    #[test]
    fn closed_container_is_inaccessible() {
        let mut prop = closet();
        assert!(!prop.container_accessible());
        assert!(prop.open().success);
        assert!(prop.container_accessible());
    }

    #[test]
    fn locked_prop_will_not_open() {
        let mut prop = Prop::new("chest").with_openable().with_lockable(None);
        if let Some(lock) = prop.capabilities.lockable.as_mut() {
            lock.locked = true;
        }
        let result = prop.open();
        assert!(!result.success);
        assert!(result.description.contains("locked"));
        assert!(!prop.is_open());
    }

    #[test]
    fn lock_requires_closed() {
        let mut prop = Prop::new("chest").with_openable().with_lockable(None);
        prop.open();
        let result = prop.lock();
        assert!(!result.success);
        assert!(!prop.is_locked());
        prop.close();
        assert!(prop.lock().success);
    }

    #[test]
    fn missing_capability_is_expected_failure() {
        let mut prop = Prop::new("bed").with_usable();
        let result = prop.open();
        assert!(!result.success);
        assert!(result.description.contains("cannot be opened"));
    }

    #[test]
    fn examine_reports_contents_when_open() {
        let mut prop = closet();
        prop.open();
        if let Some(container) = prop.capabilities.container.as_mut() {
            container.insert(Item::new("broom"));
        }
        let result = prop.examine();
        assert!(result.description.contains("broom"));
    }
}
