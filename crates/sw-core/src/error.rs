/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur when manipulating a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The named location does not exist in the world.
    #[error("location not found: \"{0}\"")]
    LocationNotFound(String),

    /// The named character does not exist in the world.
    #[error("character not found: \"{0}\"")]
    CharacterNotFound(String),

    /// The named item is not held where the caller expected it.
    #[error("item not found: \"{0}\"")]
    ItemNotFound(String),

    /// The named prop does not exist at the given location.
    #[error("prop not found: \"{0}\"")]
    PropNotFound(String),

    /// An entity with the same name already exists.
    #[error("entity already exists: \"{0}\"")]
    DuplicateName(String),

    /// A mandatory reference is missing or dangling.
    ///
    /// This is the integrity tier: it indicates a malformed world, not an
    /// expected in-fiction failure.
    #[error("integrity error: {0}")]
    Integrity(String),
}
