//! Error types for the engine.

use thiserror::Error;
use sw_core::WorldError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during resolution and execution.
///
/// These are the integrity tier: expected in-fiction failures never reach
/// this type, they are reported as unsuccessful
/// [`sw_core::ActionResult`]s instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The acting character does not exist in the world.
    #[error("actor not found: \"{0}\"")]
    ActorNotFound(String),

    /// The game has ended; no further actions are accepted.
    #[error("the game is over")]
    GameOver,

    /// No action has executed yet, so there is no last-action schema.
    #[error("no action has been executed yet")]
    NoActionYet,

    /// A saved game names an action class that is not registered.
    #[error("saved game references unregistered action: \"{0}\"")]
    UnknownAction(String),

    /// The saved primitive tree could not be decoded.
    #[error("malformed saved game: {0}")]
    MalformedSave(#[from] serde_json::Error),

    /// A world-level integrity violation surfaced during direct execution.
    #[error(transparent)]
    World(#[from] WorldError),
}
