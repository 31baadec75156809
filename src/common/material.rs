//! Defines physical material properties.

use serde::{Deserialize, Serialize};

/// Surface response coefficients for a physics body. Both values live in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Coefficient of restitution (bounciness).
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Coefficient of friction. 0 = frictionless, 1 = maximum surface grip.
    pub friction: f64,
}

impl PhysicsMaterial {
    /// Creates a new material, clamping both coefficients into [0, 1].
    pub fn new(restitution: f64, friction: f64) -> Self {
        PhysicsMaterial {
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.clamp(0.0, 1.0),
        }
    }

    /// Combines the materials of two colliding bodies into the effective
    /// coefficients for one collision event. Friction multiplies, restitution
    /// takes the maximum of the two surfaces.
    pub fn combine(self, other: Self) -> Self {
        PhysicsMaterial {
            restitution: self.restitution.max(other.restitution),
            friction: self.friction * other.friction,
        }
    }
}

impl Default for PhysicsMaterial {
    /// Default material properties (moderate restitution, moderate friction).
    fn default() -> Self {
        PhysicsMaterial {
            restitution: 0.2,
            friction: 0.5,
        }
    }
}
