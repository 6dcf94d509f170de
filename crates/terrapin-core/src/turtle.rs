//! One turtle instance: pose plus optional canvas and marker.

use std::f64::consts::PI;

use terrapin_types::{Color, Point};

use crate::canvas::Canvas;
use crate::error::{TurtleError, TurtleResult};
use crate::marker::{Marker, MARKER_OFFSET};
use crate::pose::{Pose, PoseSnapshot};

/// A single replica: owns its pose, and optionally a drawing surface and
/// an on-screen marker.
///
/// The invisible grading replicas own a canvas but no marker; an instance
/// with neither still tracks geometry.
pub struct TurtleInstance {
    pose: Pose,
    canvas: Option<Canvas>,
    marker: Option<Box<dyn Marker>>,
}

impl TurtleInstance {
    /// A fresh instance at the reset pose, with no canvas or marker.
    pub fn new() -> Self {
        Self {
            pose: Pose::reset(None),
            canvas: None,
            marker: None,
        }
    }

    // ── state access ──

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Serializable pose snapshot for golden comparison.
    pub fn snapshot(&self) -> PoseSnapshot {
        self.pose.snapshot()
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }

    // ── lifecycle ──

    /// Reset to the canvas center: heading 0, pen down, black stroke, the
    /// given step scale (or the default). Clears the owned canvas and
    /// squares the marker back over the start position.
    pub fn reset(&mut self, step_scale: Option<f64>) {
        self.pose = Pose::reset(step_scale);
        if let Some(canvas) = &mut self.canvas {
            canvas.clear();
        }
        if let Some(marker) = &mut self.marker {
            marker.clear_rotation();
            marker.set_position(marker_anchor(self.pose.position));
        }
    }

    /// Bind a drawing surface, dropping any previously painted content
    /// association.
    pub fn attach_canvas(&mut self, canvas: Canvas) {
        self.canvas = Some(canvas);
    }

    /// Take the surface back out (detaching a visible display).
    pub fn detach_canvas(&mut self) -> Option<Canvas> {
        self.canvas.take()
    }

    /// Bind a marker and immediately position it over the current pose.
    pub fn attach_marker(&mut self, mut marker: Box<dyn Marker>) {
        marker.set_position(marker_anchor(self.pose.position));
        self.marker = Some(marker);
    }

    // ── operations ──

    /// Rotate by `angle_degrees`. Positive angles accumulate clockwise in
    /// the heading; the marker receives the negated heading, matching the
    /// reference renders.
    pub fn turn(&mut self, angle_degrees: f64) {
        self.pose.heading += angle_degrees * PI / 180.0;
        if let Some(marker) = &mut self.marker {
            marker.set_rotation(-self.pose.heading);
        }
    }

    /// Move `amount` steps along the current heading, painting the
    /// old-to-new segment when the pen is down.
    ///
    /// Negative amounts move backward; a zero amount is a geometric no-op.
    pub fn advance(&mut self, amount: f64) -> TurtleResult<()> {
        if self.pose.pen_down && self.canvas.is_none() {
            return Err(TurtleError::MissingRenderingTarget);
        }

        let from = self.pose.position;
        let to = from + self.pose.displacement(amount);
        self.pose.position = to;

        if self.pose.pen_down {
            if let Some(canvas) = &mut self.canvas {
                canvas.stroke_line(from, to, self.pose.stroke_color);
            }
        }
        if let Some(marker) = &mut self.marker {
            marker.set_position(marker_anchor(to));
        }
        Ok(())
    }

    pub fn set_pen_down(&mut self, down: bool) {
        self.pose.pen_down = down;
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.pose.stroke_color = color;
    }

    pub fn set_step_scale(&mut self, step_scale: f64) {
        self.pose.step_scale = step_scale;
    }
}

impl Default for TurtleInstance {
    fn default() -> Self {
        Self::new()
    }
}

/// Marker top-left corner for a pose position.
fn marker_anchor(position: Point) -> Point {
    Point::new(position.x + MARKER_OFFSET.0, position.y + MARKER_OFFSET.1)
}
