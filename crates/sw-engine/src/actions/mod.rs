//! The concrete verb families.

mod consume;
mod examine;
mod go;
mod look;
mod place;
mod take;
mod toggle;
mod using;

pub use consume::ConsumeAction;
pub use examine::ExamineAction;
pub use go::GoAction;
pub use look::LookAction;
pub use place::PlaceAction;
pub use take::{DropAction, TakeAction};
pub use toggle::ToggleAction;
pub use using::UseAction;

use crate::binding::Binding;

/// A binding with a single operand.
pub(crate) fn bind1(key: &str, value: impl Into<String>) -> Binding {
    let mut binding = Binding::new();
    binding.insert(key.to_string(), value.into());
    binding
}

/// A binding with two operands.
pub(crate) fn bind2(
    key_a: &str,
    value_a: impl Into<String>,
    key_b: &str,
    value_b: impl Into<String>,
) -> Binding {
    let mut binding = bind1(key_a, value_a);
    binding.insert(key_b.to_string(), value_b.into());
    binding
}
