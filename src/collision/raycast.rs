// Ray intersection tests against the collider shapes.
//
// Rays carry a maximum distance; hits beyond it are discarded. All tests run
// in world space, like the narrow phase.

use super::bounding_area::BoundingArea;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::shapes::line_segment::LineSegment;
use crate::shapes::Shape;

const PARALLEL_EPSILON: f64 = 1e-12;

/// Margin applied to a ray's bounding area so axis-aligned rays still have
/// extent on both axes.
const RAY_BOUNDS_MARGIN: f64 = 1e-3;

/// A finite ray: origin, unit direction, and maximum travel distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub direction: Vec2,
    pub distance: f64,
}

impl Ray {
    /// Creates a ray, normalizing the direction. A zero direction or
    /// non-positive distance yields a ray that hits nothing.
    pub fn new(origin: Vec2, direction: Vec2, distance: f64) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            distance,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec2::ZERO || self.distance <= 0.0
    }

    /// The point at parametric distance `t` along the ray.
    pub fn point_at(&self, t: f64) -> Vec2 {
        self.origin + self.direction * t
    }

    /// A bounding area covering the ray's full travel, slightly inflated so
    /// axis-aligned rays keep extent on both axes.
    pub fn bounds(&self) -> BoundingArea {
        let end = self.point_at(self.distance.max(0.0));
        let margin = Vec2::new(RAY_BOUNDS_MARGIN, RAY_BOUNDS_MARGIN);
        BoundingArea::new(self.origin.min(end) - margin, self.origin.max(end) + margin)
    }
}

/// A ray hit against a body's collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Index of the body that was hit.
    pub body: usize,
    /// The world-space hit point.
    pub point: Vec2,
    /// The surface normal at the hit point, facing back along the ray.
    pub normal: Vec2,
    /// Travel distance from the ray origin to the hit point.
    pub distance: f64,
}

/// A shape-level intersection, before it is attributed to a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntersection {
    pub point: Vec2,
    pub normal: Vec2,
    pub distance: f64,
}

/// Casts the ray against a transformed shape and returns the nearest hit.
pub fn raycast_shape(ray: &Ray, shape: &Shape, transform: &Transform) -> Option<RayIntersection> {
    if ray.is_degenerate() {
        return None;
    }

    match shape {
        Shape::Circle(circle) => ray_circle(
            ray,
            transform.position,
            circle.radius * transform.max_scale(),
        ),
        Shape::Line(segment) => ray_segment(
            ray,
            transform.apply(segment.start),
            transform.apply(segment.end),
        ),
        Shape::Polygon(polygon) => {
            let vertices: Vec<Vec2> = polygon.vertices.iter().map(|v| transform.apply(*v)).collect();
            ray_polygon(ray, &vertices)
        }
        Shape::LineStrip(strip) => {
            let mut nearest: Option<RayIntersection> = None;
            for segment in strip.segments() {
                let hit = ray_segment(
                    ray,
                    transform.apply(segment.start),
                    transform.apply(segment.end),
                );
                if let Some(hit) = hit {
                    if nearest.map_or(true, |n| hit.distance < n.distance) {
                        nearest = Some(hit);
                    }
                }
            }
            nearest
        }
    }
}

fn ray_circle(ray: &Ray, center: Vec2, radius: f64) -> Option<RayIntersection> {
    if radius <= 0.0 {
        return None;
    }

    // |o + t*d - c|^2 = r^2 with unit d reduces to t^2 + 2bt + c = 0
    let offset = ray.origin - center;
    let b = offset.dot(ray.direction);
    let c = offset.magnitude_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let mut t = -b - sqrt_d;
    if t < 0.0 {
        // Origin inside the circle: the exit point is the hit
        t = -b + sqrt_d;
    }
    if t < 0.0 || t > ray.distance {
        return None;
    }

    let point = ray.point_at(t);
    Some(RayIntersection {
        point,
        normal: (point - center) / radius,
        distance: t,
    })
}

fn ray_segment(ray: &Ray, a: Vec2, b: Vec2) -> Option<RayIntersection> {
    let segment = LineSegment::new(a, b);
    if segment.is_degenerate() {
        return None;
    }

    let along = segment.direction();
    let denom = ray.direction.cross(along);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let offset = a - ray.origin;
    let t = offset.cross(along) / denom;
    let u = offset.cross(ray.direction) / denom;
    if t < 0.0 || t > ray.distance || !(0.0..=1.0).contains(&u) {
        return None;
    }

    let mut normal = along.perpendicular().normalize();
    if normal.dot(ray.direction) > 0.0 {
        normal = -normal;
    }

    Some(RayIntersection {
        point: ray.point_at(t),
        normal,
        distance: t,
    })
}

fn ray_polygon(ray: &Ray, vertices: &[Vec2]) -> Option<RayIntersection> {
    let n = vertices.len();
    if n < 3 {
        return None;
    }

    let mut nearest: Option<RayIntersection> = None;
    for i in 0..n {
        let hit = ray_segment(ray, vertices[i], vertices[(i + 1) % n]);
        if let Some(hit) = hit {
            if nearest.map_or(true, |best| hit.distance < best.distance) {
                nearest = Some(hit);
            }
        }
    }
    nearest
}
