//! Free-text command resolution.
//!
//! Resolution classifies intent before any pattern is tried: a
//! comma-separated input is a sequence, a bare exit label is movement,
//! and anything else is scanned against the registry's command patterns
//! in registration order, first match wins. The winning pattern and its
//! operand binding form an [`Invocation`], the same currency discovery
//! deals in.

use sw_core::World;

use crate::action::ActionClass as _;
use crate::actions::GoAction;
use crate::binding::{match_pattern, Invocation};
use crate::registry::ActionRegistry;

/// What a line of input resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A single action invocation.
    Command {
        /// Name of the action class that claimed the input.
        action: &'static str,
        /// The matched pattern and operand binding.
        invocation: Invocation,
    },
    /// Several commands, separated by commas, to run in order.
    Sequence(Vec<Resolution>),
    /// Nothing claimed the input.
    Unrecognized(String),
}

/// Resolve one line of input for `actor`.
pub fn resolve(world: &World, registry: &ActionRegistry, actor: &str, input: &str) -> Resolution {
    let input = input.trim();

    if input.contains(',') {
        let parts: Vec<Resolution> = input
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| resolve(world, registry, actor, part))
            .collect();
        return match parts.len() {
            0 => Resolution::Unrecognized(input.to_string()),
            1 => parts.into_iter().next().unwrap_or_else(|| {
                Resolution::Unrecognized(input.to_string())
            }),
            _ => Resolution::Sequence(parts),
        };
    }

    // A bare exit label is shorthand for going that way.
    let exit = world
        .location_of(actor)
        .ok()
        .and_then(|location| {
            location
                .connections
                .keys()
                .find(|d| d.eq_ignore_ascii_case(input))
        })
        .cloned();
    if let Some(direction) = exit {
        let invocation = Invocation::new(
            "go {direction}",
            crate::actions::bind1("direction", direction),
        );
        return Resolution::Command {
            action: GoAction.name(),
            invocation,
        };
    }

    for class in registry.classes() {
        for &pattern in class.command_patterns() {
            if let Some(binding) = match_pattern(pattern, input) {
                return Resolution::Command {
                    action: class.name(),
                    invocation: Invocation::new(pattern, binding),
                };
            }
        }
    }
    Resolution::Unrecognized(input.to_string())
}
