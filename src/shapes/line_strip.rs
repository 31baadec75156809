use serde::{Deserialize, Serialize};

use super::line_segment::LineSegment;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

/// Perpendicular distance within which a point counts as lying on a segment.
const ON_SEGMENT_EPSILON: f64 = 1e-3;

/// An open chain of line segments defined by consecutive points.
/// Useful for terrain and moving platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStrip {
    pub points: Vec<Vec2>,
}

impl LineStrip {
    /// Creates a new line strip. A strip with fewer than two points has no
    /// segments and never intersects anything.
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Iterates the strip as consecutive point-pair segments in local space.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.points
            .windows(2)
            .map(|pair| LineSegment::new(pair[0], pair[1]))
    }

    /// Returns the first world-space segment containing `point`: the point's
    /// projection must fall within the segment and its perpendicular distance
    /// from the segment must be within a small epsilon.
    pub fn try_get_segment_containing_point(
        &self,
        transform: &Transform,
        point: Vec2,
    ) -> Option<LineSegment> {
        for segment in self.segments() {
            let a = transform.apply(segment.start);
            let b = transform.apply(segment.end);
            let ab = b - a;
            let length_sq = ab.magnitude_squared();
            if length_sq < 1e-12 {
                continue;
            }

            let t = (point - a).dot(ab) / length_sq;
            if !(0.0..=1.0).contains(&t) {
                continue;
            }

            let closest = a + ab * t;
            if point.distance_squared(closest) <= ON_SEGMENT_EPSILON * ON_SEGMENT_EPSILON {
                return Some(LineSegment::new(a, b));
            }
        }
        None
    }
}
