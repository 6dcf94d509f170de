//! Replica-set session for graded turtle runs.
//!
//! Four turtle replicas — two on-screen, two invisible — receive command
//! streams through a single dispatcher. Learner commands fan out over the
//! active subset; the reference solution is replayed once per reset onto
//! the reference replicas; an external grader compares the two invisible
//! surfaces afterwards.

pub mod command;
pub mod error;
pub mod pacing;
pub mod replica;
pub mod session;

pub use command::{Command, Direction, Operation, PenState};
pub use error::{CommandError, CommandResult};
pub use pacing::{CancelToken, Pacer};
pub use replica::ReplicaSet;
pub use session::{DisplayBinding, GridConfig, Session, SessionConfig, SolutionProc};
