// The simulation container and per-step pipeline:
// integrate velocities, rebuild the broad phase, narrow-phase the candidate
// pairs, then resolve contacts with impulses and positional correction.

use serde::{Deserialize, Serialize};

use crate::collision::detection::check_collision;
use crate::collision::manifold::CollisionManifold;
use crate::collision::quad_tree::QuadTree;
use crate::collision::raycast::{raycast_shape, Ray, RaycastHit};
use crate::common::error::PhysicsError;
use crate::common::layers::LayerSettings;
use crate::math::vec2::Vec2;
use crate::objects::body::PhysicsBody;

/// Fraction of the remaining penetration removed per step. Less than 1 keeps
/// stacked bodies from jittering.
const POSITION_CORRECTION_PERCENT: f64 = 0.8;

/// Penetration depth tolerated without positional correction.
const PENETRATION_SLOP: f64 = 0.005;

/// Tunable global simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// Acceleration applied to every dynamic body, in units per second squared.
    pub gravity: Vec2,
    /// Optional cap on the speed of dynamic bodies.
    pub terminal_velocity: Option<f64>,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            terminal_velocity: None,
        }
    }
}

/// One body's view of a contact found during the last step. Every contact
/// produces two mirrored records, one per body involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRecord {
    /// The body this record belongs to.
    pub body: usize,
    /// The other body involved.
    pub other: usize,
    /// Contact normal pointing from `body` towards `other`.
    pub normal: Vec2,
    /// Penetration depth at the time of detection.
    pub depth: f64,
    /// World-space contact point on `body`.
    pub point: Vec2,
    /// True when either collider involved is a trigger.
    pub is_trigger: bool,
}

/// The physics simulation: owns the bodies, the layer table, and the broad
/// phase, and advances everything in fixed time steps.
pub struct PhysicsWorld {
    bodies: Vec<PhysicsBody>,
    settings: PhysicsSettings,
    layer_settings: LayerSettings,
    broad_phase: QuadTree<usize>,
    collisions: Vec<CollisionRecord>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_settings(PhysicsSettings::default())
    }

    pub fn with_settings(settings: PhysicsSettings) -> Self {
        Self {
            bodies: Vec::new(),
            settings,
            layer_settings: LayerSettings::new(),
            broad_phase: QuadTree::unbounded(),
            collisions: Vec::new(),
        }
    }

    /// Adds a body and returns its index. Indices are stable; bodies are
    /// never removed, only disabled.
    pub fn add_body(&mut self, body: PhysicsBody) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn body(&self, index: usize) -> Option<&PhysicsBody> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut PhysicsBody> {
        self.bodies.get_mut(index)
    }

    pub fn bodies(&self) -> &[PhysicsBody] {
        &self.bodies
    }

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut PhysicsSettings {
        &mut self.settings
    }

    pub fn layer_settings(&self) -> &LayerSettings {
        &self.layer_settings
    }

    pub fn layer_settings_mut(&mut self) -> &mut LayerSettings {
        &mut self.layer_settings
    }

    /// The contacts found during the most recent step, two mirrored records
    /// per contact.
    pub fn collisions(&self) -> &[CollisionRecord] {
        &self.collisions
    }

    /// Advances the simulation by `dt` seconds. The time step must be
    /// positive and finite.
    pub fn step(&mut self, dt: f64) -> Result<(), PhysicsError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }

        self.collisions.clear();
        self.integrate(dt);
        self.refresh_broad_phase();

        let pairs = self.collect_pairs();
        log::debug!(
            "step: dt={}, bodies={}, candidate pairs={}",
            dt,
            self.bodies.len(),
            pairs.len()
        );

        for (a, b) in pairs {
            let body_a = &self.bodies[a];
            let body_b = &self.bodies[b];

            let is_trigger = body_a.is_trigger() || body_b.is_trigger();
            // Neither side can respond and nobody listens: skip the narrow phase
            if !is_trigger
                && body_a.effective_inv_mass() == 0.0
                && body_b.effective_inv_mass() == 0.0
            {
                continue;
            }
            if !self
                .layer_settings
                .should_collide(body_a.layers(), body_b.layers())
            {
                continue;
            }

            let (Some(collider_a), Some(collider_b)) =
                (body_a.collider.as_ref(), body_b.collider.as_ref())
            else {
                continue;
            };

            let manifold = match check_collision(
                a,
                collider_a.shape(),
                &body_a.transform,
                b,
                collider_b.shape(),
                &body_b.transform,
            ) {
                Some(manifold) => manifold,
                None => continue,
            };

            log::trace!(
                "contact: {} <-> {}, normal={:?}, depth={}",
                a,
                b,
                manifold.normal,
                manifold.depth
            );
            self.record_collision(&manifold, is_trigger);

            if !is_trigger {
                // a < b holds for every candidate pair
                let (head, tail) = self.bodies.split_at_mut(b);
                Self::resolve_collision(&mut head[a], &mut tail[0], &manifold);
            }
        }

        Ok(())
    }

    /// Casts a ray and returns the nearest hit among bodies whose layers
    /// intersect `layers`.
    pub fn try_raycast(
        &mut self,
        origin: Vec2,
        direction: Vec2,
        distance: f64,
        layers: u32,
    ) -> Option<RaycastHit> {
        self.raycast_all(origin, direction, distance, layers)
            .into_iter()
            .next()
    }

    /// Casts a ray and returns every hit, nearest first.
    pub fn raycast_all(
        &mut self,
        origin: Vec2,
        direction: Vec2,
        distance: f64,
        layers: u32,
    ) -> Vec<RaycastHit> {
        let ray = Ray::new(origin, direction, distance);
        if ray.is_degenerate() || layers == 0 {
            return Vec::new();
        }

        // Bounds must reflect the bodies' current transforms
        self.refresh_broad_phase();

        let mut hits = Vec::new();
        for index in self.broad_phase.retrieve_potential_collisions(&ray.bounds()) {
            let body = &self.bodies[index];
            if body.layers() & layers == 0 {
                continue;
            }
            let Some(collider) = body.collider.as_ref() else {
                continue;
            };
            if let Some(hit) = raycast_shape(&ray, collider.shape(), &body.transform) {
                hits.push(RaycastHit {
                    body: index,
                    point: hit.point,
                    normal: hit.normal,
                    distance: hit.distance,
                });
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn integrate(&mut self, dt: f64) {
        for body in &mut self.bodies {
            if !body.enabled || body.is_static() {
                continue;
            }
            if body.is_dynamic() {
                body.velocity += self.settings.gravity * dt;
                if let Some(terminal) = self.settings.terminal_velocity {
                    body.velocity = body.velocity.clamp_magnitude(terminal);
                }
            }
            body.transform.position += body.velocity * dt;
        }
    }

    fn refresh_broad_phase(&mut self) {
        self.broad_phase.clear();
        for index in 0..self.bodies.len() {
            if !self.bodies[index].enabled {
                continue;
            }
            let bounds = self.bodies[index].bounding_area();
            if !bounds.is_empty() {
                self.broad_phase.insert(index, bounds);
            }
        }
    }

    /// Candidate pairs from the broad phase, deduplicated and sorted so
    /// resolution order is deterministic.
    fn collect_pairs(&mut self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for index in 0..self.bodies.len() {
            if !self.bodies[index].enabled {
                continue;
            }
            let bounds = self.bodies[index].bounding_area();
            if bounds.is_empty() {
                continue;
            }
            for other in self.broad_phase.retrieve_potential_collisions(&bounds) {
                if other == index {
                    continue;
                }
                pairs.push(if index < other {
                    (index, other)
                } else {
                    (other, index)
                });
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    fn record_collision(&mut self, manifold: &CollisionManifold, is_trigger: bool) {
        self.collisions.push(CollisionRecord {
            body: manifold.body_a_idx,
            other: manifold.body_b_idx,
            normal: manifold.normal,
            depth: manifold.depth,
            point: manifold.contact.point_a,
            is_trigger,
        });
        self.collisions.push(CollisionRecord {
            body: manifold.body_b_idx,
            other: manifold.body_a_idx,
            normal: -manifold.normal,
            depth: manifold.depth,
            point: manifold.contact.point_b,
            is_trigger,
        });
    }

    /// Resolves one contact: positional correction, then a restitution
    /// impulse along the normal, then a Coulomb-clamped friction impulse
    /// along the tangent.
    fn resolve_collision(
        body_a: &mut PhysicsBody,
        body_b: &mut PhysicsBody,
        manifold: &CollisionManifold,
    ) {
        let inv_a = body_a.effective_inv_mass();
        let inv_b = body_b.effective_inv_mass();
        let inv_sum = inv_a + inv_b;
        if inv_sum == 0.0 {
            return;
        }

        let normal = manifold.normal;

        let correction_magnitude =
            (manifold.depth - PENETRATION_SLOP).max(0.0) / inv_sum * POSITION_CORRECTION_PERCENT;
        let correction = normal * correction_magnitude;
        body_a.transform.position -= correction * inv_a;
        body_b.transform.position += correction * inv_b;

        let relative = body_b.velocity - body_a.velocity;
        let velocity_along_normal = relative.dot(normal);
        // Already separating: correct the overlap but leave velocities alone
        if velocity_along_normal > 0.0 {
            return;
        }

        let material = body_a.material.combine(body_b.material);
        let impulse_magnitude = -(1.0 + material.restitution) * velocity_along_normal / inv_sum;
        let impulse = normal * impulse_magnitude;
        body_a.velocity -= impulse * inv_a;
        body_b.velocity += impulse * inv_b;

        // Friction acts on whatever tangential motion the normal impulse left
        let relative = body_b.velocity - body_a.velocity;
        let tangent = relative - normal * relative.dot(normal);
        if tangent.magnitude_squared() < 1e-12 {
            return;
        }
        let tangent = tangent.normalize();

        // Clamping to mu * j means friction can stop tangential sliding but
        // never reverse it
        let max_friction = material.friction * impulse_magnitude;
        let friction_magnitude =
            (-relative.dot(tangent) / inv_sum).clamp(-max_friction, max_friction);
        let friction_impulse = tangent * friction_magnitude;
        body_a.velocity -= friction_impulse * inv_a;
        body_b.velocity += friction_impulse * inv_b;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::layers::{ALL_LAYERS, DEFAULT_LAYER};
    use crate::common::material::PhysicsMaterial;
    use crate::objects::collider::Collider;
    use crate::shapes::circle::Circle;
    use crate::shapes::line_segment::LineSegment;
    use crate::shapes::Shape;

    const DT: f64 = 1.0 / 60.0;
    const EPSILON: f64 = 1e-9;

    fn circle_body(position: Vec2, mass: f64, radius: f64) -> PhysicsBody {
        PhysicsBody::new(position, mass)
            .unwrap()
            .with_collider(Collider::new(Shape::Circle(Circle::new(radius))))
    }

    fn static_platform(y: f64, half_width: f64) -> PhysicsBody {
        PhysicsBody::new_static(Vec2::ZERO).with_collider(Collider::new(Shape::Line(
            LineSegment::new(Vec2::new(-half_width, y), Vec2::new(half_width, y)),
        )))
    }

    fn zero_gravity() -> PhysicsSettings {
        PhysicsSettings {
            gravity: Vec2::ZERO,
            terminal_velocity: None,
        }
    }

    #[test]
    fn test_step_rejects_bad_dt() {
        let mut world = PhysicsWorld::new();
        assert!(matches!(
            world.step(0.0),
            Err(PhysicsError::InvalidTimeStep(_))
        ));
        assert!(world.step(-0.1).is_err());
        assert!(world.step(f64::NAN).is_err());
        assert!(world.step(DT).is_ok());
    }

    #[test]
    fn test_gravity_integration() {
        let mut world = PhysicsWorld::with_settings(PhysicsSettings {
            gravity: Vec2::new(0.0, -10.0),
            terminal_velocity: None,
        });
        let body = world.add_body(PhysicsBody::new(Vec2::ZERO, 1.0).unwrap());

        world.step(0.5).unwrap();

        let body = world.body(body).unwrap();
        assert!((body.velocity.y + 5.0).abs() < EPSILON);
        // Semi-implicit Euler: the new velocity moves the body
        assert!((body.transform.position.y + 2.5).abs() < EPSILON);
    }

    #[test]
    fn test_terminal_velocity_caps_speed() {
        let mut world = PhysicsWorld::with_settings(PhysicsSettings {
            gravity: Vec2::new(0.0, -100.0),
            terminal_velocity: Some(3.0),
        });
        let body = world.add_body(PhysicsBody::new(Vec2::ZERO, 1.0).unwrap());

        for _ in 0..20 {
            world.step(DT).unwrap();
        }
        assert!(world.body(body).unwrap().velocity.magnitude() <= 3.0 + EPSILON);
    }

    #[test]
    fn test_kinematic_moves_without_gravity() {
        let mut world = PhysicsWorld::new();
        let body = world.add_body(
            PhysicsBody::new_kinematic(Vec2::ZERO).with_velocity(Vec2::new(2.0, 0.0)),
        );

        world.step(0.5).unwrap();

        let body = world.body(body).unwrap();
        assert!((body.transform.position.x - 1.0).abs() < EPSILON);
        assert_eq!(body.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_static_body_never_moves() {
        let mut world = PhysicsWorld::new();
        let body = world.add_body(PhysicsBody::new_static(Vec2::new(1.0, 2.0)));
        world.step(DT).unwrap();
        assert_eq!(
            world.body(body).unwrap().transform.position,
            Vec2::new(1.0, 2.0)
        );
    }

    #[test]
    fn test_disabled_body_skipped() {
        let mut world = PhysicsWorld::new();
        let index = world.add_body(circle_body(Vec2::ZERO, 1.0, 1.0));
        world.body_mut(index).unwrap().enabled = false;
        // Overlapping enabled circle
        world.add_body(circle_body(Vec2::new(0.5, 0.0), 1.0, 1.0));

        world.step(DT).unwrap();

        assert!(world.collisions().is_empty());
        assert_eq!(world.body(index).unwrap().transform.position, Vec2::ZERO);
    }

    #[test]
    fn test_falling_circle_rests_on_platform() {
        let mut world = PhysicsWorld::with_settings(PhysicsSettings {
            gravity: Vec2::new(0.0, -9.0),
            terminal_velocity: None,
        });
        let no_bounce = PhysicsMaterial::new(0.0, 0.5);

        let mut circle = circle_body(Vec2::new(0.0, 3.0), 3.0, 0.75);
        circle.material = no_bounce;
        let circle = world.add_body(circle);

        let mut platform = static_platform(0.0, 5.0);
        platform.material = no_bounce;
        world.add_body(platform);

        for _ in 0..400 {
            world.step(DT).unwrap();
        }

        let body = world.body(circle).unwrap();
        // Resting on the line: center one radius above it, give or take slop
        assert!(
            (body.transform.position.y - 0.75).abs() < 0.02,
            "rest height {}",
            body.transform.position.y
        );
        assert!(body.velocity.magnitude() < 0.2);
        assert!(body.transform.position.x.abs() < EPSILON);
        // The contact is still being reported every step
        assert!(world.collisions().iter().any(|c| c.body == circle));
    }

    #[test]
    fn test_full_restitution_reflects_velocity() {
        let mut world = PhysicsWorld::with_settings(zero_gravity());
        let bouncy = PhysicsMaterial::new(1.0, 0.0);

        let mut circle = circle_body(Vec2::new(0.0, 1.0), 1.0, 1.0)
            .with_velocity(Vec2::new(0.0, -5.0));
        circle.material = bouncy;
        let circle = world.add_body(circle);

        let mut platform = static_platform(0.0, 5.0);
        platform.material = bouncy;
        world.add_body(platform);

        world.step(DT).unwrap();

        let body = world.body(circle).unwrap();
        assert!((body.velocity.y - 5.0).abs() < EPSILON);
        assert!(body.velocity.x.abs() < EPSILON);
    }

    #[test]
    fn test_equal_mass_head_on_elastic_exchange() {
        let mut world = PhysicsWorld::with_settings(zero_gravity());
        let elastic = PhysicsMaterial::new(1.0, 0.0);

        let mut left =
            circle_body(Vec2::new(-0.9, 0.0), 1.0, 1.0).with_velocity(Vec2::new(1.0, 0.0));
        left.material = elastic;
        let left = world.add_body(left);

        let mut right =
            circle_body(Vec2::new(0.9, 0.0), 1.0, 1.0).with_velocity(Vec2::new(-1.0, 0.0));
        right.material = elastic;
        let right = world.add_body(right);

        world.step(0.001).unwrap();

        assert!((world.body(left).unwrap().velocity.x + 1.0).abs() < EPSILON);
        assert!((world.body(right).unwrap().velocity.x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_friction_slows_sliding_without_reversal() {
        let mut world = PhysicsWorld::with_settings(PhysicsSettings {
            gravity: Vec2::new(0.0, -9.0),
            terminal_velocity: None,
        });
        let rough = PhysicsMaterial::new(0.0, 0.8);

        let mut circle =
            circle_body(Vec2::new(-4.0, 0.75), 1.0, 0.75).with_velocity(Vec2::new(5.0, 0.0));
        circle.material = rough;
        let circle = world.add_body(circle);

        let mut platform = static_platform(0.0, 50.0);
        platform.material = rough;
        world.add_body(platform);

        let mut previous = 5.0;
        for _ in 0..120 {
            world.step(DT).unwrap();
            let vx = world.body(circle).unwrap().velocity.x;
            assert!(vx <= previous + EPSILON, "sliding must not speed up");
            assert!(vx >= -EPSILON, "friction must never reverse the slide");
            previous = vx;
        }
        assert!(previous < 5.0);
    }

    #[test]
    fn test_collision_records_are_mirrored() {
        let mut world = PhysicsWorld::with_settings(zero_gravity());
        let a = world.add_body(circle_body(Vec2::new(0.0, 0.0), 1.0, 1.0));
        let b = world.add_body(circle_body(Vec2::new(1.5, 0.0), 1.0, 1.0));

        world.step(DT).unwrap();

        let records = world.collisions();
        assert_eq!(records.len(), 2);
        let record_a = records.iter().find(|r| r.body == a).unwrap();
        let record_b = records.iter().find(|r| r.body == b).unwrap();
        assert_eq!(record_a.other, b);
        assert_eq!(record_b.other, a);
        assert_eq!(record_a.normal, -record_b.normal);
        assert!((record_a.depth - record_b.depth).abs() < EPSILON);
        assert!(!record_a.is_trigger);
    }

    #[test]
    fn test_records_cleared_each_step() {
        let mut world = PhysicsWorld::with_settings(zero_gravity());
        world.add_body(circle_body(Vec2::new(0.0, 0.0), 1.0, 1.0));
        let other = world.add_body(circle_body(Vec2::new(1.5, 0.0), 1.0, 1.0));

        world.step(DT).unwrap();
        assert!(!world.collisions().is_empty());

        // Separate the pair; the old records must not linger
        world.body_mut(other).unwrap().transform.position = Vec2::new(100.0, 0.0);
        world.body_mut(other).unwrap().velocity = Vec2::ZERO;
        world.step(DT).unwrap();
        assert!(world.collisions().is_empty());
    }

    #[test]
    fn test_trigger_reports_but_does_not_resolve() {
        let mut world = PhysicsWorld::with_settings(zero_gravity());
        let mover = world.add_body(
            circle_body(Vec2::new(-0.5, 0.0), 1.0, 1.0).with_velocity(Vec2::new(1.0, 0.0)),
        );
        world.add_body(
            PhysicsBody::new_static(Vec2::ZERO)
                .with_collider(Collider::new_trigger(Shape::Circle(Circle::new(1.0)))),
        );

        world.step(DT).unwrap();

        // Overlap reported as a trigger
        assert!(world.collisions().iter().any(|r| r.is_trigger));
        // Velocity untouched, position advanced purely by integration
        let body = world.body(mover).unwrap();
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
        assert!((body.transform.position.x - (-0.5 + DT)).abs() < EPSILON);
    }

    #[test]
    fn test_static_pair_not_reported() {
        let mut world = PhysicsWorld::with_settings(zero_gravity());
        world.add_body(
            PhysicsBody::new_static(Vec2::ZERO)
                .with_collider(Collider::new(Shape::Circle(Circle::new(1.0)))),
        );
        world.add_body(
            PhysicsBody::new_static(Vec2::new(0.5, 0.0))
                .with_collider(Collider::new(Shape::Circle(Circle::new(1.0)))),
        );

        world.step(DT).unwrap();
        assert!(world.collisions().is_empty());
    }

    #[test]
    fn test_layer_filtering_blocks_pair() {
        let mut world = PhysicsWorld::with_settings(zero_gravity());
        // Layers 2 and 3 only collide with themselves
        world.layer_settings_mut().set_mask(2, 1 << 2).unwrap();
        world.layer_settings_mut().set_mask(3, 1 << 3).unwrap();

        let mut a = circle_body(Vec2::new(0.0, 0.0), 1.0, 1.0);
        if let Some(c) = a.collider.as_mut() {
            c.set_layers(1 << 2);
        }
        let a = world.add_body(a);

        let mut b = circle_body(Vec2::new(0.5, 0.0), 1.0, 1.0);
        if let Some(c) = b.collider.as_mut() {
            c.set_layers(1 << 3);
        }
        world.add_body(b);

        world.step(DT).unwrap();

        assert!(world.collisions().is_empty());
        assert_eq!(world.body(a).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_layer_filtering_suppresses_triggers() {
        let mut world = PhysicsWorld::with_settings(zero_gravity());
        // Layers 2 and 3 only collide with themselves
        world.layer_settings_mut().set_mask(2, 1 << 2).unwrap();
        world.layer_settings_mut().set_mask(3, 1 << 3).unwrap();

        let mut solid = circle_body(Vec2::new(0.0, 0.0), 1.0, 1.0);
        if let Some(c) = solid.collider.as_mut() {
            c.set_layers(1 << 2);
        }
        world.add_body(solid);

        // Overlapping trigger on the excluded layer: no record of any kind
        let mut sensor = PhysicsBody::new_static(Vec2::new(0.5, 0.0))
            .with_collider(Collider::new_trigger(Shape::Circle(Circle::new(1.0))));
        if let Some(c) = sensor.collider.as_mut() {
            c.set_layers(1 << 3);
        }
        world.add_body(sensor);

        world.step(DT).unwrap();
        assert!(world.collisions().is_empty());
    }

    #[test]
    fn test_raycast_hits_nearest_body() {
        let mut world = PhysicsWorld::new();
        let target = world.add_body(
            PhysicsBody::new_static(Vec2::ZERO)
                .with_collider(Collider::new(Shape::Circle(Circle::new(1.0)))),
        );

        let hit = world
            .try_raycast(Vec2::new(0.0, 10.0), Vec2::new(0.0, -1.0), 100.0, ALL_LAYERS)
            .unwrap();

        assert_eq!(hit.body, target);
        assert!((hit.point.y - 1.0).abs() < EPSILON);
        assert!(hit.point.x.abs() < EPSILON);
        assert!((hit.distance - 9.0).abs() < EPSILON);
        assert!((hit.normal.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_raycast_sees_current_transforms() {
        let mut world = PhysicsWorld::new();
        let target = world.add_body(
            PhysicsBody::new_static(Vec2::new(50.0, 0.0))
                .with_collider(Collider::new(Shape::Circle(Circle::new(1.0)))),
        );

        // Miss at the starting position, then move the body under the ray
        assert!(world
            .try_raycast(Vec2::new(0.0, 10.0), Vec2::new(0.0, -1.0), 100.0, ALL_LAYERS)
            .is_none());

        world.body_mut(target).unwrap().transform.position = Vec2::ZERO;
        assert!(world
            .try_raycast(Vec2::new(0.0, 10.0), Vec2::new(0.0, -1.0), 100.0, ALL_LAYERS)
            .is_some());
    }

    #[test]
    fn test_raycast_all_sorted_by_distance() {
        let mut world = PhysicsWorld::new();
        let far = world.add_body(
            PhysicsBody::new_static(Vec2::new(0.0, 0.0))
                .with_collider(Collider::new(Shape::Circle(Circle::new(1.0)))),
        );
        let near = world.add_body(
            PhysicsBody::new_static(Vec2::new(0.0, 5.0))
                .with_collider(Collider::new(Shape::Circle(Circle::new(1.0)))),
        );

        let hits = world.raycast_all(
            Vec2::new(0.0, 10.0),
            Vec2::new(0.0, -1.0),
            100.0,
            ALL_LAYERS,
        );

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].body, near);
        assert_eq!(hits[1].body, far);
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn test_raycast_respects_layer_mask() {
        let mut world = PhysicsWorld::new();
        let mut body = PhysicsBody::new_static(Vec2::ZERO)
            .with_collider(Collider::new(Shape::Circle(Circle::new(1.0))));
        if let Some(c) = body.collider.as_mut() {
            c.set_layers(1 << 4);
        }
        world.add_body(body);

        assert!(world
            .try_raycast(Vec2::new(0.0, 10.0), Vec2::new(0.0, -1.0), 100.0, DEFAULT_LAYER)
            .is_none());
        assert!(world
            .try_raycast(Vec2::new(0.0, 10.0), Vec2::new(0.0, -1.0), 100.0, 1 << 4)
            .is_some());
    }

    #[test]
    fn test_raycast_respects_max_distance() {
        let mut world = PhysicsWorld::new();
        world.add_body(
            PhysicsBody::new_static(Vec2::ZERO)
                .with_collider(Collider::new(Shape::Circle(Circle::new(1.0)))),
        );

        assert!(world
            .try_raycast(Vec2::new(0.0, 10.0), Vec2::new(0.0, -1.0), 5.0, ALL_LAYERS)
            .is_none());
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let settings = PhysicsSettings {
            gravity: Vec2::new(0.0, -3.7),
            terminal_velocity: Some(12.0),
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: PhysicsSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
