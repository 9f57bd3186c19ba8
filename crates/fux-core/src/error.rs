use thiserror::Error;

/// Structural errors reported by the node arena.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("attaching node would create a cycle")]
    Cycle,
    #[error("node no longer exists")]
    MissingNode,
}

/// A font or image could not be resolved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("no font available for family {0:?}")]
    FontUnavailable(String),
    #[error("image not found: {0}")]
    ImageNotFound(String),
}
