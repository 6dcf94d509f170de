//! Visual marker capability.

use terrapin_types::Point;

/// Anchor offset applied when positioning the marker image over the pose.
/// Fixed; never re-derived from the heading.
pub const MARKER_OFFSET: (f64, f64) = (-11.0, -13.0);

/// On-screen marker reflecting a turtle's position and orientation.
///
/// Implemented by the UI collaborator; instances without a marker skip all
/// marker updates. Positions arrive already offset by [`MARKER_OFFSET`].
/// Marker updates are display-only and must never feed back into geometry.
pub trait Marker {
    /// Place the marker's top-left corner.
    fn set_position(&mut self, top_left: Point);

    /// Rotate the marker. The instance passes the negated heading.
    fn set_rotation(&mut self, radians: f64);

    /// Drop any applied rotation (reset state).
    fn clear_rotation(&mut self);
}
