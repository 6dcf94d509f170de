//! Deterministic turtle execution core.
//!
//! A [`TurtleInstance`] turns motion/pen/color operations into pose
//! mutations and, when a canvas is attached, painted strokes. Replicas fed
//! the same operation sequence from the same starting pose stay
//! bit-identical — the grading path depends on it.

pub mod canvas;
pub mod error;
pub mod marker;
pub mod pose;
pub mod turtle;

pub use canvas::{Canvas, StrokeSegment, STROKE_WIDTH};
pub use error::{TurtleError, TurtleResult};
pub use marker::{Marker, MARKER_OFFSET};
pub use pose::{Pose, PoseSnapshot, CANVAS_CENTER, CANVAS_SIZE, DEFAULT_STEP_SCALE, MOVE_SCALE};
pub use turtle::TurtleInstance;
