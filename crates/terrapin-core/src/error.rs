//! Error types for the execution core.

use std::fmt;

/// Core execution error — lifecycle precondition violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurtleError {
    /// Paint attempted on an instance with no attached canvas.
    /// A lifecycle bug, not a user error: the run cannot continue.
    MissingRenderingTarget,
}

impl fmt::Display for TurtleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRenderingTarget => {
                write!(f, "missing rendering target: paint attempted with no attached canvas")
            }
        }
    }
}

impl std::error::Error for TurtleError {}

/// Result alias for core operations.
pub type TurtleResult<T> = Result<T, TurtleError>;
