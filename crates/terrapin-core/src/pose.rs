//! Pose state for one turtle instance.

use serde::{Deserialize, Serialize};
use terrapin_types::{Color, Point};

/// Side length of the square drawing surface, in pixels.
pub const CANVAS_SIZE: u32 = 300;

/// Canvas center — the position every instance resets to.
pub const CANVAS_CENTER: Point = Point::new(150.0, 150.0);

/// Fixed multiplier applied to every movement distance, on top of the
/// per-instance step scale.
pub const MOVE_SCALE: f64 = 10.0;

/// Step scale applied when a reset does not specify one.
pub const DEFAULT_STEP_SCALE: f64 = 5.0;

/// Everything that determines where the next stroke lands.
///
/// Mutated only through [`TurtleInstance`](crate::TurtleInstance)
/// operations. The heading is in radians, clockwise-positive, and
/// accumulates without normalization across turns.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub position: Point,
    pub heading: f64,
    pub pen_down: bool,
    pub stroke_color: Color,
    pub step_scale: f64,
}

impl Pose {
    /// A freshly reset pose at the canvas center: heading 0, pen down,
    /// black stroke, the given step scale (or the default).
    pub fn reset(step_scale: Option<f64>) -> Self {
        Self {
            position: CANVAS_CENTER,
            heading: 0.0,
            pen_down: true,
            stroke_color: Color::BLACK,
            step_scale: step_scale.unwrap_or(DEFAULT_STEP_SCALE),
        }
    }

    /// Displacement of a move by `amount` steps at the current heading.
    ///
    /// Heading 0 points toward the top of the canvas; positive headings
    /// swing clockwise. The negated sin/cos pair is the exact formula the
    /// reference renders were produced with.
    pub fn displacement(&self, amount: f64) -> Point {
        let dx = -amount * self.step_scale * MOVE_SCALE * self.heading.sin();
        let dy = -amount * self.step_scale * MOVE_SCALE * self.heading.cos();
        Point::new(dx, dy)
    }

    /// Capture a serializable snapshot for golden comparison.
    pub fn snapshot(&self) -> PoseSnapshot {
        PoseSnapshot {
            position: self.position,
            heading: self.heading,
            pen_down: self.pen_down,
            stroke_color: self.stroke_color,
            step_scale: self.step_scale,
        }
    }
}

/// Serializable pose snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    pub position: Point,
    pub heading: f64,
    pub pen_down: bool,
    pub stroke_color: Color,
    pub step_scale: f64,
}
