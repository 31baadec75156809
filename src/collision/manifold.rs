use crate::math::vec2::Vec2;

/// Stores information about a collision contact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactPoint {
    /// Contact point on body A in world coordinates.
    pub point_a: Vec2,
    /// Contact point on body B in world coordinates.
    pub point_b: Vec2,
}

/// Stores information about a collision between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionManifold {
    /// Index of the first body involved in the collision.
    pub body_a_idx: usize,
    /// Index of the second body involved in the collision.
    pub body_b_idx: usize,
    /// The collision normal, pointing from body A towards body B.
    pub normal: Vec2,
    /// The amount of penetration between the shapes.
    pub depth: f64,
    /// The contact point pair.
    pub contact: ContactPoint,
}

impl CollisionManifold {
    /// The minimum translation vector separating the shapes, oriented from
    /// body A towards body B.
    pub fn minimum_translation(&self) -> Vec2 {
        self.normal * self.depth
    }

    /// The same contact seen from body B's perspective.
    pub fn flipped(&self) -> CollisionManifold {
        CollisionManifold {
            body_a_idx: self.body_b_idx,
            body_b_idx: self.body_a_idx,
            normal: -self.normal,
            depth: self.depth,
            contact: ContactPoint {
                point_a: self.contact.point_b,
                point_b: self.contact.point_a,
            },
        }
    }
}
