// Narrow-phase collision detection.
//
// All pairwise tests run in world space: shapes are transformed first, then
// tested geometrically. Polygon pairs use the separating-axis theorem and
// report the minimum translation vector as the contact normal and depth.
// Normals always point from the first shape towards the second.

use super::manifold::{CollisionManifold, ContactPoint};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::shapes::line_segment::LineSegment;
use crate::shapes::polygon::Polygon;
use crate::shapes::Shape;

const PARALLEL_EPSILON: f64 = 1e-12;

/// Penetration depth along an axis given two projected intervals. Negative
/// means the intervals are separated along this axis. The push-distance form
/// handles one interval containing the other, where plain intersection
/// length would report zero.
fn axis_overlap(min_a: f64, max_a: f64, min_b: f64, max_b: f64) -> f64 {
    (max_a - min_b).min(max_b - min_a)
}

/// Tests two shapes for intersection and builds the full manifold, tagging it
/// with the given body indices. Touching shapes (zero penetration) count as
/// colliding. Degenerate shapes (zero radius, zero-length segments) never
/// collide.
pub fn check_collision(
    idx_a: usize,
    shape_a: &Shape,
    transform_a: &Transform,
    idx_b: usize,
    shape_b: &Shape,
    transform_b: &Transform,
) -> Option<CollisionManifold> {
    let (normal, depth, contact) = collide_shapes(shape_a, transform_a, shape_b, transform_b)?;
    Some(CollisionManifold {
        body_a_idx: idx_a,
        body_b_idx: idx_b,
        normal,
        depth,
        contact,
    })
}

type Contact = (Vec2, f64, ContactPoint);

fn flip(contact: Contact) -> Contact {
    let (normal, depth, points) = contact;
    (
        -normal,
        depth,
        ContactPoint {
            point_a: points.point_b,
            point_b: points.point_a,
        },
    )
}

fn collide_shapes(
    shape_a: &Shape,
    transform_a: &Transform,
    shape_b: &Shape,
    transform_b: &Transform,
) -> Option<Contact> {
    match (shape_a, shape_b) {
        (Shape::Circle(a), Shape::Circle(b)) => circle_circle(
            transform_a.position,
            a.radius * transform_a.max_scale(),
            transform_b.position,
            b.radius * transform_b.max_scale(),
        ),
        (Shape::Circle(a), Shape::Line(b)) => circle_segment(
            transform_a.position,
            a.radius * transform_a.max_scale(),
            &world_segment(b, transform_b),
        ),
        (Shape::Circle(a), Shape::Polygon(b)) => circle_polygon(
            transform_a.position,
            a.radius * transform_a.max_scale(),
            &world_vertices(&b.vertices, transform_b),
        ),
        (Shape::Line(a), Shape::Line(b)) => {
            segment_segment(&world_segment(a, transform_a), &world_segment(b, transform_b))
        }
        (Shape::Line(a), Shape::Polygon(b)) => segment_polygon(
            &world_segment(a, transform_a),
            &world_vertices(&b.vertices, transform_b),
        ),
        (Shape::Polygon(a), Shape::Polygon(b)) => polygon_polygon(
            &world_vertices(&a.vertices, transform_a),
            &world_vertices(&b.vertices, transform_b),
        ),
        (Shape::Line(_), Shape::Circle(_))
        | (Shape::Polygon(_), Shape::Circle(_))
        | (Shape::Polygon(_), Shape::Line(_)) => {
            collide_shapes(shape_b, transform_b, shape_a, transform_a).map(flip)
        }
        // Strips decompose into their segments; the first intersecting
        // segment wins
        (_, Shape::LineStrip(strip)) => {
            for segment in strip.segments() {
                let world = Shape::Line(world_segment(&segment, transform_b));
                let identity = Transform::identity();
                if let Some(contact) = collide_shapes(shape_a, transform_a, &world, &identity) {
                    return Some(contact);
                }
            }
            None
        }
        (Shape::LineStrip(_), _) => {
            collide_shapes(shape_b, transform_b, shape_a, transform_a).map(flip)
        }
    }
}

fn world_segment(segment: &LineSegment, transform: &Transform) -> LineSegment {
    LineSegment::new(transform.apply(segment.start), transform.apply(segment.end))
}

fn world_vertices(vertices: &[Vec2], transform: &Transform) -> Vec<Vec2> {
    vertices.iter().map(|v| transform.apply(*v)).collect()
}

/// The point on segment `ab` closest to `point`.
pub(crate) fn closest_point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let length_sq = ab.magnitude_squared();
    if length_sq < PARALLEL_EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    a + ab * t
}

fn circle_circle(center_a: Vec2, radius_a: f64, center_b: Vec2, radius_b: f64) -> Option<Contact> {
    if radius_a <= 0.0 || radius_b <= 0.0 {
        return None;
    }

    let delta = center_b - center_a;
    let distance = delta.magnitude();
    let radii = radius_a + radius_b;
    if distance > radii {
        return None;
    }

    // Concentric circles have no preferred direction; pick one
    let normal = if distance > PARALLEL_EPSILON {
        delta / distance
    } else {
        Vec2::UP
    };

    Some((
        normal,
        radii - distance,
        ContactPoint {
            point_a: center_a + normal * radius_a,
            point_b: center_b - normal * radius_b,
        },
    ))
}

fn circle_segment(center: Vec2, radius: f64, segment: &LineSegment) -> Option<Contact> {
    if radius <= 0.0 || segment.is_degenerate() {
        return None;
    }

    let closest = closest_point_on_segment(center, segment.start, segment.end);
    let delta = closest - center;
    let distance = delta.magnitude();
    if distance > radius {
        return None;
    }

    // Center exactly on the segment: push out along the segment normal
    let normal = if distance > PARALLEL_EPSILON {
        delta / distance
    } else {
        segment.direction().perpendicular().normalize()
    };

    Some((
        normal,
        radius - distance,
        ContactPoint {
            point_a: center + normal * radius,
            point_b: closest,
        },
    ))
}

/// Segment-segment intersection via the cross-product parametric test.
/// Parallel (including collinear overlapping) segments report no contact.
fn segment_segment(a: &LineSegment, b: &LineSegment) -> Option<Contact> {
    if a.is_degenerate() || b.is_degenerate() {
        return None;
    }

    let dir_a = a.direction();
    let dir_b = b.direction();
    let denom = dir_a.cross(dir_b);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let offset = b.start - a.start;
    let t = offset.cross(dir_b) / denom;
    let u = offset.cross(dir_a) / denom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    let point = a.start + dir_a * t;
    // Zero-thickness shapes cross at a point; orient the normal (B's segment
    // normal) so it points away from A's start
    let mut normal = dir_b.perpendicular().normalize();
    if normal.dot(a.start - point) > 0.0 {
        normal = -normal;
    }

    Some((
        normal,
        0.0,
        ContactPoint {
            point_a: point,
            point_b: point,
        },
    ))
}

fn project_points(points: &[Vec2], axis: Vec2) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for point in points {
        let projection = point.dot(axis);
        min = min.min(projection);
        max = max.max(projection);
    }
    (min, max)
}

fn vertex_average(vertices: &[Vec2]) -> Vec2 {
    let mut sum = Vec2::ZERO;
    for v in vertices {
        sum += *v;
    }
    sum / (vertices.len() as f64)
}

/// The vertex with the greatest projection along `direction`.
fn support_point(vertices: &[Vec2], direction: Vec2) -> Vec2 {
    let mut best = vertices[0];
    let mut best_projection = best.dot(direction);
    for v in vertices.iter().skip(1) {
        let projection = v.dot(direction);
        if projection > best_projection {
            best_projection = projection;
            best = *v;
        }
    }
    best
}

fn circle_polygon(center: Vec2, radius: f64, vertices: &[Vec2]) -> Option<Contact> {
    if radius <= 0.0 || vertices.len() < 3 {
        return None;
    }

    let mut axes = Polygon::edge_normals_of(vertices);
    if axes.is_empty() {
        return None;
    }

    // The axis through the closest vertex catches corner contacts the edge
    // normals miss
    let mut closest = vertices[0];
    let mut closest_distance_sq = center.distance_squared(closest);
    for v in vertices.iter().skip(1) {
        let distance_sq = center.distance_squared(*v);
        if distance_sq < closest_distance_sq {
            closest_distance_sq = distance_sq;
            closest = *v;
        }
    }
    let to_closest = closest - center;
    if to_closest.magnitude_squared() > PARALLEL_EPSILON {
        axes.push(to_closest.normalize());
    }

    let mut min_depth = f64::MAX;
    let mut min_axis = Vec2::ZERO;
    for axis in axes {
        let (poly_min, poly_max) = project_points(vertices, axis);
        let center_projection = center.dot(axis);
        let overlap = axis_overlap(
            poly_min,
            poly_max,
            center_projection - radius,
            center_projection + radius,
        );
        if overlap < 0.0 {
            return None;
        }
        if overlap < min_depth {
            min_depth = overlap;
            min_axis = axis;
        }
    }

    let mut normal = min_axis;
    if normal.dot(vertex_average(vertices) - center) < 0.0 {
        normal = -normal;
    }

    let point_a = center + normal * radius;
    Some((
        normal,
        min_depth,
        ContactPoint {
            point_a,
            point_b: point_a - normal * min_depth,
        },
    ))
}

fn segment_polygon(segment: &LineSegment, vertices: &[Vec2]) -> Option<Contact> {
    if segment.is_degenerate() || vertices.len() < 3 {
        return None;
    }

    let mut axes = Polygon::edge_normals_of(vertices);
    if axes.is_empty() {
        return None;
    }
    axes.push(segment.direction().perpendicular().normalize());

    let endpoints = [segment.start, segment.end];
    let mut min_depth = f64::MAX;
    let mut min_axis = Vec2::ZERO;
    for axis in axes {
        let (poly_min, poly_max) = project_points(vertices, axis);
        let (seg_min, seg_max) = project_points(&endpoints, axis);
        let overlap = axis_overlap(poly_min, poly_max, seg_min, seg_max);
        if overlap < 0.0 {
            return None;
        }
        if overlap < min_depth {
            min_depth = overlap;
            min_axis = axis;
        }
    }

    let midpoint = (segment.start + segment.end) / 2.0;
    let mut normal = min_axis;
    if normal.dot(vertex_average(vertices) - midpoint) < 0.0 {
        normal = -normal;
    }

    Some((
        normal,
        min_depth,
        ContactPoint {
            point_a: support_point(&endpoints, normal),
            point_b: support_point(vertices, -normal),
        },
    ))
}

fn polygon_polygon(vertices_a: &[Vec2], vertices_b: &[Vec2]) -> Option<Contact> {
    if vertices_a.len() < 3 || vertices_b.len() < 3 {
        return None;
    }

    let mut axes = Polygon::edge_normals_of(vertices_a);
    axes.extend(Polygon::edge_normals_of(vertices_b));
    if axes.is_empty() {
        return None;
    }

    let mut min_depth = f64::MAX;
    let mut min_axis = Vec2::ZERO;
    for axis in axes {
        let (min_a, max_a) = project_points(vertices_a, axis);
        let (min_b, max_b) = project_points(vertices_b, axis);
        let overlap = axis_overlap(min_a, max_a, min_b, max_b);
        if overlap < 0.0 {
            return None;
        }
        if overlap < min_depth {
            min_depth = overlap;
            min_axis = axis;
        }
    }

    let mut normal = min_axis;
    if normal.dot(vertex_average(vertices_b) - vertex_average(vertices_a)) < 0.0 {
        normal = -normal;
    }

    Some((
        normal,
        min_depth,
        ContactPoint {
            point_a: support_point(vertices_a, normal),
            point_b: support_point(vertices_b, -normal),
        },
    ))
}
