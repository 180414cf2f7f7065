//! Error types for the scheduler.

use sw_engine::EngineError;
use thiserror::Error;

/// Result type for scheduler operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors that can occur while driving turns.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No decision provider is registered for the actor whose turn it is.
    #[error("no decision provider for actor: \"{0}\"")]
    NoProvider(String),

    /// The provider failed to produce a command.
    #[error("decision failed: {0}")]
    Decision(String),

    /// The game has no next actor; it is over.
    #[error("the game is over")]
    GameOver,

    /// The engine rejected the executed command.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
