//! Operand bindings and command-pattern matching.
//!
//! A command pattern is a templated string such as `"get {item}"` or
//! `"put {item} in {container}"`. Literal words must match the input
//! exactly (case-insensitive); placeholder words match greedily against
//! the remaining tokens. Both the resolver and the discovery engine work
//! in terms of [`Invocation`]s, so a command a consumer discovered is by
//! construction a command the resolver accepts.

use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use sw_core::WorldError;

/// Operand assignments: placeholder name -> literal operand text.
pub type Binding = BTreeMap<String, String>;

/// One concrete candidate action: a command pattern plus the operands
/// bound into its placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The matched command pattern.
    pub pattern: &'static str,
    /// The operand binding. May carry keys the pattern does not use.
    pub binding: Binding,
}

impl Invocation {
    /// Couple a pattern with a binding.
    pub fn new(pattern: &'static str, binding: Binding) -> Self {
        Self { pattern, binding }
    }

    /// Look up an operand.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.binding.get(key).map(String::as_str)
    }

    /// Look up an operand that the matched pattern guarantees to exist.
    /// A missing operand here is an integrity error, not user error.
    pub fn operand(&self, key: &str) -> EngineResult<&str> {
        self.get(key).ok_or_else(|| {
            EngineError::World(WorldError::Integrity(format!(
                "pattern \"{}\" bound without operand \"{key}\"",
                self.pattern
            )))
        })
    }

    /// The literal command string this invocation stands for.
    pub fn command(&self) -> String {
        substitute(self.pattern, &self.binding).unwrap_or_else(|| self.pattern.to_string())
    }

    /// The operand bound to the pattern's first placeholder, if any.
    /// This is the action's primary target (the item taken, the prop
    /// opened, the direction walked).
    pub fn primary_operand(&self) -> Option<&str> {
        placeholders(self.pattern).next().and_then(|p| self.get(p))
    }
}

/// Iterate the placeholder names of a pattern.
pub fn placeholders(pattern: &str) -> impl Iterator<Item = &str> {
    pattern
        .split_whitespace()
        .filter_map(|w| w.strip_prefix('{').and_then(|w| w.strip_suffix('}')))
}

/// Whether a binding supplies every placeholder of a pattern.
pub fn covers(pattern: &str, binding: &Binding) -> bool {
    placeholders(pattern).all(|p| binding.contains_key(p))
}

/// Substitute a binding into a pattern, producing a literal command.
/// Returns `None` when the binding misses a placeholder.
pub fn substitute(pattern: &str, binding: &Binding) -> Option<String> {
    let mut words = Vec::new();
    for word in pattern.split_whitespace() {
        match word.strip_prefix('{').and_then(|w| w.strip_suffix('}')) {
            Some(key) => words.push(binding.get(key)?.clone()),
            None => words.push(word.to_string()),
        }
    }
    Some(words.join(" "))
}

/// Match an input command against a pattern, word by word, left to right.
/// Literals compare case-insensitively; placeholders consume one or more
/// tokens, greedily. Returns the operand binding on success.
pub fn match_pattern(pattern: &str, input: &str) -> Option<Binding> {
    let pattern_words: Vec<&str> = pattern.split_whitespace().collect();
    let input_words: Vec<&str> = input.split_whitespace().collect();
    match_words(&pattern_words, &input_words)
}

fn match_words(pattern: &[&str], input: &[&str]) -> Option<Binding> {
    let Some((head, rest)) = pattern.split_first() else {
        return input.is_empty().then(Binding::new);
    };

    match head.strip_prefix('{').and_then(|w| w.strip_suffix('}')) {
        Some(key) => {
            // Greedy: longest span first.
            for taken in (1..=input.len()).rev() {
                if let Some(mut binding) = match_words(rest, &input[taken..]) {
                    let value = input[..taken].join(" ");
                    match binding.get(key) {
                        // A repeated placeholder must bind the same text.
                        Some(existing) if existing != &value => continue,
                        _ => {
                            binding.insert(key.to_string(), value);
                            return Some(binding);
                        }
                    }
                }
            }
            None
        }
        None => {
            let (first, remaining) = input.split_first()?;
            if first.eq_ignore_ascii_case(head) {
                match_words(rest, remaining)
            } else {
                None
            }
        }
    }
}
