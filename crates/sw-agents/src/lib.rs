//! Asynchronous turn scheduling for Spielwelt.
//!
//! The engine is synchronous and single-writer; choosing what an actor
//! does may not be (a language-model call, a human at a keyboard). This
//! crate owns that seam: a [`DecisionProvider`] produces a command for
//! the actor whose turn it is, and the [`TurnScheduler`] executes it
//! against the engine under a timeout, one full turn at a time.

pub mod config;
pub mod error;
pub mod provider;
pub mod scheduler;

pub use config::SchedulerConfig;
pub use error::{AgentError, AgentResult};
pub use provider::{DecisionFuture, DecisionProvider, FirstActionProvider, ScriptedProvider};
pub use scheduler::{TurnReport, TurnScheduler};
