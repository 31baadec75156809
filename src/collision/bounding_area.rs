// Axis-aligned bounding area used by the broad phase.

use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;

/// An axis-aligned box defined by its minimum and maximum corner points.
/// Bodies with no collider carry the canonical `EMPTY` area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingArea {
    /// The canonical zero-extent area.
    pub const EMPTY: BoundingArea = BoundingArea {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    /// Creates a new area. Corner coordinates are normalized so that
    /// `min <= max` holds per axis.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        BoundingArea {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// True when the area has no extent on either axis.
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Checks if this area overlaps with another area. Zero-extent areas
    /// overlap nothing.
    pub fn overlaps(&self, other: &BoundingArea) -> bool {
        let x_overlap = self.max.x > other.min.x && self.min.x < other.max.x;
        let y_overlap = self.max.y > other.min.y && self.min.y < other.max.y;
        x_overlap && y_overlap
    }

    /// Checks if this area fully contains another area.
    pub fn contains(&self, other: &BoundingArea) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    /// Merges another area into this one, expanding this area to contain both.
    /// Empty areas contribute nothing.
    pub fn merge(&mut self, other: &BoundingArea) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// The union of N areas. Combining nothing, or only empty areas,
    /// yields `EMPTY`.
    pub fn combine(areas: &[BoundingArea]) -> BoundingArea {
        let mut combined = BoundingArea::EMPTY;
        for area in areas {
            combined.merge(area);
        }
        combined
    }

    /// Expands the area outward by `amount` on every side. Flat areas (such
    /// as the bounds of an axis-aligned segment) gain extent and stop being
    /// empty.
    pub fn inflated(&self, amount: f64) -> BoundingArea {
        let margin = Vec2::new(amount, amount);
        BoundingArea {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Creates an area that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_pt = points[0];
        let mut max_pt = points[0];
        for point in points.iter().skip(1) {
            min_pt = min_pt.min(*point);
            max_pt = max_pt.max(*point);
        }
        Some(BoundingArea {
            min: min_pt,
            max: max_pt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_corners() {
        let area = BoundingArea::new(Vec2::new(3.0, 1.0), Vec2::new(1.0, 4.0));
        assert_eq!(area.min, Vec2::new(1.0, 1.0));
        assert_eq!(area.max, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_empty_sentinel() {
        assert!(BoundingArea::EMPTY.is_empty());
        assert!(!BoundingArea::new(Vec2::ZERO, Vec2::ONE).is_empty());
        // A degenerate line (no extent on one axis) counts as empty
        assert!(BoundingArea::new(Vec2::ZERO, Vec2::new(5.0, 0.0)).is_empty());
    }

    #[test]
    fn test_overlaps() {
        let a = BoundingArea::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = BoundingArea::new(Vec2::new(1.0, 1.0), Vec2::new(3.0, 3.0));
        let c = BoundingArea::new(Vec2::new(5.0, 5.0), Vec2::new(6.0, 6.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        // Touching edges do not overlap
        let d = BoundingArea::new(Vec2::new(2.0, 0.0), Vec2::new(3.0, 2.0));
        assert!(!a.overlaps(&d));
        // Empty areas overlap nothing
        assert!(!a.overlaps(&BoundingArea::EMPTY));
    }

    #[test]
    fn test_contains() {
        let outer = BoundingArea::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let inner = BoundingArea::new(Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0));
        let straddling = BoundingArea::new(Vec2::new(8.0, 8.0), Vec2::new(12.0, 12.0));
        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&straddling));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_merge_and_combine() {
        let a = BoundingArea::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = BoundingArea::new(Vec2::new(2.0, -1.0), Vec2::new(3.0, 0.5));

        let combined = BoundingArea::combine(&[a, b]);
        assert_eq!(combined.min, Vec2::new(0.0, -1.0));
        assert_eq!(combined.max, Vec2::new(3.0, 1.0));

        // Empties are ignored
        assert_eq!(BoundingArea::combine(&[a, BoundingArea::EMPTY]), a);
        assert_eq!(BoundingArea::combine(&[]), BoundingArea::EMPTY);
        assert_eq!(
            BoundingArea::combine(&[BoundingArea::EMPTY]),
            BoundingArea::EMPTY
        );
    }

    #[test]
    fn test_inflated_gives_flat_areas_extent() {
        let flat = BoundingArea::new(Vec2::ZERO, Vec2::new(5.0, 0.0));
        assert!(flat.is_empty());
        let inflated = flat.inflated(0.01);
        assert!(!inflated.is_empty());
        assert_eq!(inflated.min, Vec2::new(-0.01, -0.01));
        assert_eq!(inflated.max, Vec2::new(5.01, 0.01));
    }

    #[test]
    fn test_from_points() {
        let points = [
            Vec2::new(1.0, 5.0),
            Vec2::new(-2.0, 0.0),
            Vec2::new(4.0, 2.0),
        ];
        let area = BoundingArea::from_points(&points).unwrap();
        assert_eq!(area.min, Vec2::new(-2.0, 0.0));
        assert_eq!(area.max, Vec2::new(4.0, 5.0));

        assert!(BoundingArea::from_points(&[]).is_none());
    }
}
