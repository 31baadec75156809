use serde::{Deserialize, Serialize};

use super::collider::Collider;
use crate::collision::bounding_area::BoundingArea;
use crate::common::error::PhysicsError;
use crate::common::material::PhysicsMaterial;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

/// A simulated body: a transform, a linear velocity, mass, and an optional
/// collider. Mass is stored as its inverse; zero inverse mass marks a body
/// with infinite mass that collisions cannot move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub transform: Transform,
    pub velocity: Vec2,
    inv_mass: f64,
    /// Kinematic bodies move by their velocity but ignore gravity and
    /// collision impulses.
    pub is_kinematic: bool,
    /// Disabled bodies are skipped entirely by the simulation.
    pub enabled: bool,
    pub material: PhysicsMaterial,
    pub collider: Option<Collider>,
}

impl PhysicsBody {
    /// Creates a dynamic body. Mass must be positive and finite.
    pub fn new(position: Vec2, mass: f64) -> Result<Self, PhysicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        Ok(Self {
            transform: Transform::from_position(position),
            velocity: Vec2::ZERO,
            inv_mass: 1.0 / mass,
            is_kinematic: false,
            enabled: true,
            material: PhysicsMaterial::default(),
            collider: None,
        })
    }

    /// Creates a static body: infinite mass, never moved by the simulation.
    pub fn new_static(position: Vec2) -> Self {
        Self {
            transform: Transform::from_position(position),
            velocity: Vec2::ZERO,
            inv_mass: 0.0,
            is_kinematic: false,
            enabled: true,
            material: PhysicsMaterial::default(),
            collider: None,
        }
    }

    /// Creates a kinematic body: moves by its velocity, immune to gravity
    /// and impulses.
    pub fn new_kinematic(position: Vec2) -> Self {
        let mut body = Self::new_static(position);
        body.is_kinematic = true;
        body
    }

    /// Attaches a collider, builder style.
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Sets an initial velocity, builder style.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// The body's mass; infinite for static bodies.
    pub fn mass(&self) -> f64 {
        if self.inv_mass == 0.0 {
            f64::INFINITY
        } else {
            1.0 / self.inv_mass
        }
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    /// The inverse mass the impulse solver sees: kinematic bodies respond to
    /// nothing.
    pub fn effective_inv_mass(&self) -> f64 {
        if self.is_kinematic {
            0.0
        } else {
            self.inv_mass
        }
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<(), PhysicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        self.inv_mass = 1.0 / mass;
        Ok(())
    }

    /// Gives the body infinite mass.
    pub fn make_static(&mut self) {
        self.inv_mass = 0.0;
        self.velocity = Vec2::ZERO;
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0 && !self.is_kinematic
    }

    /// True when the body can be moved by gravity and impulses.
    pub fn is_dynamic(&self) -> bool {
        self.inv_mass > 0.0 && !self.is_kinematic
    }

    /// The collider's layer bitmask; a body without a collider belongs to no
    /// layer and collides with nothing.
    pub fn layers(&self) -> u32 {
        self.collider.as_ref().map_or(0, |c| c.layers())
    }

    pub fn is_trigger(&self) -> bool {
        self.collider.as_ref().is_some_and(|c| c.is_trigger())
    }

    /// The world-space bounding area of the attached collider, or `EMPTY`
    /// when there is none.
    pub fn bounding_area(&mut self) -> BoundingArea {
        match &mut self.collider {
            Some(collider) => collider.bounding_area(&self.transform),
            None => BoundingArea::EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::layers::DEFAULT_LAYER;
    use crate::shapes::circle::Circle;
    use crate::shapes::Shape;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_body_new() {
        let body = PhysicsBody::new(Vec2::new(1.0, 2.0), 4.0).unwrap();
        assert_eq!(body.transform.position, Vec2::new(1.0, 2.0));
        assert!((body.mass() - 4.0).abs() < EPSILON);
        assert!((body.inv_mass() - 0.25).abs() < EPSILON);
        assert!(body.is_dynamic());
        assert!(body.enabled);
    }

    #[test]
    fn test_body_invalid_mass() {
        assert!(matches!(
            PhysicsBody::new(Vec2::ZERO, 0.0),
            Err(PhysicsError::InvalidMass(_))
        ));
        assert!(PhysicsBody::new(Vec2::ZERO, -1.0).is_err());
        assert!(PhysicsBody::new(Vec2::ZERO, f64::NAN).is_err());
        assert!(PhysicsBody::new(Vec2::ZERO, f64::INFINITY).is_err());
    }

    #[test]
    fn test_static_body() {
        let body = PhysicsBody::new_static(Vec2::ZERO);
        assert_eq!(body.inv_mass(), 0.0);
        assert!(body.mass().is_infinite());
        assert!(body.is_static());
        assert!(!body.is_dynamic());
    }

    #[test]
    fn test_kinematic_body() {
        let body = PhysicsBody::new_kinematic(Vec2::ZERO).with_velocity(Vec2::new(1.0, 0.0));
        assert!(body.is_kinematic);
        assert!(!body.is_static());
        assert!(!body.is_dynamic());
        assert_eq!(body.effective_inv_mass(), 0.0);
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_set_mass_and_make_static() {
        let mut body = PhysicsBody::new(Vec2::ZERO, 2.0).unwrap();
        body.set_mass(10.0).unwrap();
        assert!((body.inv_mass() - 0.1).abs() < EPSILON);
        assert!(body.set_mass(-3.0).is_err());

        body.velocity = Vec2::new(5.0, 5.0);
        body.make_static();
        assert!(body.is_static());
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_layers_default_and_missing_collider() {
        let bare = PhysicsBody::new_static(Vec2::ZERO);
        assert_eq!(bare.layers(), 0);
        assert!(!bare.is_trigger());

        let with_collider = PhysicsBody::new_static(Vec2::ZERO)
            .with_collider(Collider::new(Shape::Circle(Circle::new(1.0))));
        assert_eq!(with_collider.layers(), DEFAULT_LAYER);
    }

    #[test]
    fn test_bounding_area_without_collider_is_empty() {
        let mut body = PhysicsBody::new(Vec2::new(3.0, 3.0), 1.0).unwrap();
        assert!(body.bounding_area().is_empty());
    }

    #[test]
    fn test_bounding_area_follows_transform() {
        let mut body = PhysicsBody::new(Vec2::ZERO, 1.0)
            .unwrap()
            .with_collider(Collider::new(Shape::Circle(Circle::new(1.0))));
        assert_eq!(body.bounding_area().min, Vec2::new(-1.0, -1.0));

        body.transform.position = Vec2::new(10.0, 0.0);
        assert_eq!(body.bounding_area().min, Vec2::new(9.0, -1.0));
    }
}
