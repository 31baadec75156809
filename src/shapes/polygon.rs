use serde::{Deserialize, Serialize};

use crate::common::error::PhysicsError;
use crate::math::vec2::Vec2;

/// A convex polygon defined by its vertices in local space.
/// Vertices should be ordered counter-clockwise (or clockwise, consistently).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

impl Polygon {
    /// Creates a new polygon from a vector of vertices.
    /// Fewer than 3 vertices is rejected as degenerate.
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, PhysicsError> {
        if vertices.len() < 3 {
            return Err(PhysicsError::DegenerateShape(
                "polygon needs at least 3 vertices",
            ));
        }
        Ok(Polygon { vertices })
    }

    /// An axis-aligned rectangle centered on the local origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        let hw = width.abs() / 2.0;
        let hh = height.abs() / 2.0;
        Polygon {
            vertices: vec![
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ],
        }
    }

    /// Calculates the area of the polygon using the Shoelace formula.
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % n];
            area += v1.cross(v2);
        }
        (area / 2.0).abs()
    }

    /// Calculates the centroid of the polygon. Degenerate (zero-area) input
    /// falls back to the vertex average.
    pub fn centroid(&self) -> Vec2 {
        let n = self.vertices.len();
        if n == 0 {
            return Vec2::ZERO;
        }

        let mut centroid = Vec2::ZERO;
        let mut signed_area_sum = 0.0;
        let origin = self.vertices[0];

        for i in 1..n.saturating_sub(1) {
            let v2 = self.vertices[i];
            let v3 = self.vertices[i + 1];
            let triangle_signed_area = (v2 - origin).cross(v3 - origin) / 2.0;
            signed_area_sum += triangle_signed_area;
            centroid += (origin + v2 + v3) / 3.0 * triangle_signed_area;
        }

        if signed_area_sum.abs() < 1e-10 {
            let mut avg = Vec2::ZERO;
            for v in &self.vertices {
                avg += *v;
            }
            avg / (n as f64)
        } else {
            centroid / signed_area_sum
        }
    }

    /// Returns the unit normal of each edge of the polygon. The facing of
    /// each normal depends on winding; separating-axis tests are sign-agnostic.
    pub fn edge_normals(&self) -> Vec<Vec2> {
        Self::edge_normals_of(&self.vertices)
    }

    /// Unit edge normals for any closed vertex loop, in local or world space.
    /// Zero-length edges contribute no normal.
    pub fn edge_normals_of(vertices: &[Vec2]) -> Vec<Vec2> {
        let n = vertices.len();
        let mut normals = Vec::with_capacity(n);
        for i in 0..n {
            let edge = vertices[(i + 1) % n] - vertices[i];
            if edge.magnitude_squared() > 1e-12 {
                normals.push(edge.perpendicular().normalize());
            }
        }
        normals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_polygon_new() {
        let vertices = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let polygon = Polygon::new(vertices).unwrap();
        assert_eq!(polygon.vertices.len(), 3);
    }

    #[test]
    fn test_polygon_new_too_few_vertices() {
        let vertices = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        assert!(matches!(
            Polygon::new(vertices),
            Err(PhysicsError::DegenerateShape(_))
        ));
    }

    #[test]
    fn test_polygon_rectangle() {
        let rect = Polygon::rectangle(2.0, 4.0);
        assert_eq!(rect.vertices.len(), 4);
        assert!((rect.area() - 8.0).abs() < EPSILON);
        let c = rect.centroid();
        assert!(c.x.abs() < EPSILON);
        assert!(c.y.abs() < EPSILON);
    }

    #[test]
    fn test_polygon_area_triangle() {
        let polygon = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ])
        .unwrap();
        assert!((polygon.area() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_polygon_centroid_offset_square() {
        let offset = Vec2::new(10.0, -5.0);
        let polygon = Polygon::new(vec![
            offset + Vec2::new(0.0, 0.0),
            offset + Vec2::new(1.0, 0.0),
            offset + Vec2::new(1.0, 1.0),
            offset + Vec2::new(0.0, 1.0),
        ])
        .unwrap();
        let centroid = polygon.centroid();
        let expected = offset + Vec2::new(0.5, 0.5);
        assert!((centroid.x - expected.x).abs() < EPSILON);
        assert!((centroid.y - expected.y).abs() < EPSILON);
    }

    #[test]
    fn test_polygon_centroid_collinear_fallback() {
        // All points on a line: zero area, centroid falls back to the average
        let polygon = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
        ])
        .unwrap();
        let centroid = polygon.centroid();
        assert!((centroid.x - 1.0).abs() < EPSILON);
        assert!(centroid.y.abs() < EPSILON);
    }

    #[test]
    fn test_edge_normals_skip_zero_length_edges() {
        // Duplicated vertex: the degenerate edge produces no axis
        let vertices = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ];
        let normals = Polygon::edge_normals_of(&vertices);
        assert_eq!(normals.len(), 3);
        for n in &normals {
            assert!((n.magnitude() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_polygon_edge_normals_unit_square() {
        let polygon = Polygon::rectangle(1.0, 1.0);
        let normals = polygon.edge_normals();
        assert_eq!(normals.len(), 4);
        // Bottom edge runs along +x; its normal is vertical
        assert!((normals[0].x - 0.0).abs() < EPSILON);
        assert!((normals[0].y.abs() - 1.0).abs() < EPSILON);
        for n in &normals {
            assert!((n.magnitude() - 1.0).abs() < EPSILON);
        }
    }
}
