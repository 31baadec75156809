use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// A world transform: translation, per-axis scale, and rotation in radians.
/// Points are transformed scale-first, then rotation, then translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
    pub rotation: f64, // Angle in radians
}

impl Transform {
    /// Creates a new transform.
    pub fn new(position: Vec2, scale: Vec2, rotation: f64) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }

    /// Creates a transform with unit scale and no rotation.
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }

    /// Creates an identity transform (no translation, unit scale, no rotation).
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }

    /// Applies the transform (scale, then rotation, then translation) to a point.
    pub fn apply(self, point: Vec2) -> Vec2 {
        let scaled = Vec2::new(point.x * self.scale.x, point.y * self.scale.y);
        scaled.rotate(self.rotation) + self.position
    }

    /// Applies the inverse transform to a point, mapping world space back to local space.
    /// A zero scale component collapses that axis to zero instead of producing NaN.
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        let unrotated = (point - self.position).rotate(-self.rotation);
        let inv_x = if self.scale.x != 0.0 {
            unrotated.x / self.scale.x
        } else {
            0.0
        };
        let inv_y = if self.scale.y != 0.0 {
            unrotated.y / self.scale.y
        } else {
            0.0
        };
        Vec2::new(inv_x, inv_y)
    }

    /// The largest absolute scale component. Used to scale radii conservatively.
    pub fn max_scale(self) -> f64 {
        self.scale.x.abs().max(self.scale.y.abs())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
