//! Session error types.

use thiserror::Error;

/// Errors surfaced to the program runner by the command dispatcher.
///
/// Argument-shape errors return synchronously, before any replica is
/// touched, and the continuation is never invoked for them. The rendering
/// target variant is a lifecycle precondition violation and aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A parameter had the wrong semantic kind after default substitution.
    #[error("invalid command argument: {0}")]
    InvalidCommandArgument(String),

    /// Direction outside `left`/`right`.
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// Pen state outside `up`/`down`.
    #[error("invalid pen state: {0}")]
    InvalidPenState(String),

    /// Operation name outside the dispatch table.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Paint attempted on a replica with no attached surface.
    #[error(transparent)]
    MissingRenderingTarget(#[from] terrapin_core::TurtleError),
}

/// Result alias for dispatcher operations.
pub type CommandResult<T> = Result<T, CommandError>;
