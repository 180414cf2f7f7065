//! The uniform value returned by every state-changing operation.

use serde::{Deserialize, Serialize};

/// The outcome of a capability operation or an executed action.
///
/// Every mutating operation in the engine reports its effect through an
/// `ActionResult`; it is the only channel by which effects are narrated.
/// A failed result guarantees that no state was changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// User-facing narration of what happened (or why it did not).
    pub description: String,
    /// Whether the operation took effect.
    pub success: bool,
    /// Optional one-line summary of the state change, for logs.
    pub state_changed: Option<String>,
    /// Optional structured event labels raised by the operation.
    pub events: Vec<String>,
}

impl ActionResult {
    /// A successful result with the given narration.
    pub fn ok(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            success: true,
            state_changed: None,
            events: Vec::new(),
        }
    }

    /// A failed result. The operation it reports was a no-op.
    pub fn fail(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            success: false,
            state_changed: None,
            events: Vec::new(),
        }
    }

    /// Attach a state-change summary.
    pub fn with_state_change(mut self, summary: impl Into<String>) -> Self {
        self.state_changed = Some(summary.into());
        self
    }

    /// Attach an event label.
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.events.push(event.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_result_is_success() {
        let result = ActionResult::ok("You open the door.");
        assert!(result.success);
        assert!(result.state_changed.is_none());
        assert!(result.events.is_empty());
    }

    #[test]
    fn fail_result_is_not_success() {
        let result = ActionResult::fail("The door is already open.");
        assert!(!result.success);
    }

    #[test]
    fn builder_chain() {
        let result = ActionResult::ok("You open the door.")
            .with_state_change("door: closed -> open")
            .with_event("opened");
        assert_eq!(result.state_changed.as_deref(), Some("door: closed -> open"));
        assert_eq!(result.events, vec!["opened".to_string()]);
    }
}
