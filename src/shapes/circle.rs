use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    /// Creates a new circle. Negative radii are clamped to zero; a
    /// zero-radius circle never intersects anything.
    pub fn new(radius: f64) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_new() {
        let c = Circle::new(5.0);
        assert_eq!(c.radius, 5.0);
    }

    #[test]
    fn test_circle_new_negative_radius_clamped() {
        let c = Circle::new(-1.0);
        assert_eq!(c.radius, 0.0);
    }
}
