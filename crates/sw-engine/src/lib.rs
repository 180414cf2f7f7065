//! The Spielwelt engine: action classes, command resolution, exhaustive
//! action discovery, and the turn orchestrator.
//!
//! The load-bearing idea is that the resolver and the discovery engine
//! share one currency, the [`Invocation`]: a command pattern plus an
//! operand binding. Discovery enumerates invocations and renders them to
//! command strings; the resolver parses command strings back to
//! invocations. Whatever discovery offers, the resolver accepts, by
//! construction rather than by testing.

pub mod action;
pub mod actions;
pub mod binding;
pub mod discovery;
pub mod error;
pub mod game;
pub mod parser;
pub mod registry;
pub mod resolve;
pub mod save;

pub use action::{ActionClass, Readiness};
pub use binding::{Binding, Invocation};
pub use discovery::{enumerate, AvailableAction};
pub use error::{EngineError, EngineResult};
pub use game::{ActionSchema, Game, TurnPhase, WorldStateSnapshot};
pub use parser::{resolve, Resolution};
pub use registry::ActionRegistry;
pub use save::{from_primitive, from_primitive_with_registry, to_primitive, SavedGame};
