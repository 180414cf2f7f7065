//! The ordered action-class registry.

use crate::action::ActionClass;
use crate::actions;

/// The registered action classes, in priority order.
///
/// Registration order is the resolver's tie-break: when two patterns both
/// match an input, the class registered earlier wins. The registry is
/// owned by the orchestrator and passed by reference to any collaborator
/// that needs it; there is no process-wide registry.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    classes: Vec<Box<dyn ActionClass>>,
}

impl ActionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
        }
    }

    /// The standard verb families, in their canonical priority order.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(actions::GoAction);
        registry.register(actions::TakeAction);
        registry.register(actions::DropAction);
        registry.register(actions::PlaceAction);
        registry.register(actions::ToggleAction);
        registry.register(actions::UseAction);
        registry.register(actions::ConsumeAction);
        registry.register(actions::ExamineAction);
        registry.register(actions::LookAction);
        registry
    }

    /// Append a class. Later registrations have lower matching priority.
    pub fn register<A: ActionClass + 'static>(&mut self, class: A) {
        self.classes.push(Box::new(class));
    }

    /// Iterate the classes in priority order.
    pub fn classes(&self) -> impl Iterator<Item = &dyn ActionClass> {
        self.classes.iter().map(Box::as_ref)
    }

    /// Look up a class by its stable name.
    pub fn by_name(&self, name: &str) -> Option<&dyn ActionClass> {
        self.classes
            .iter()
            .find(|c| c.name() == name)
            .map(Box::as_ref)
    }

    /// The stable names of all registered classes, in priority order.
    pub fn names(&self) -> Vec<String> {
        self.classes.iter().map(|c| c.name().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_is_ordered() {
        let registry = ActionRegistry::standard();
        let names = registry.names();
        assert_eq!(names.first().map(String::as_str), Some("go"));
        assert!(names.contains(&"take".to_string()));
        assert!(names.contains(&"look".to_string()));
    }

    #[test]
    fn by_name_finds_registered_class() {
        let registry = ActionRegistry::standard();
        assert!(registry.by_name("take").is_some());
        assert!(registry.by_name("teleport").is_none());
    }
}
