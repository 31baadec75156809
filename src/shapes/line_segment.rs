use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Calculates the length of the line segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Calculates the squared length of the line segment.
    pub fn length_squared(&self) -> f64 {
        self.start.distance_squared(self.end)
    }

    /// Returns the direction vector of the line segment (start to end).
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// A zero-length segment cannot intersect anything.
    pub fn is_degenerate(&self) -> bool {
        self.length_squared() < 1e-12
    }
}
