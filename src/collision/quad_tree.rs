// Recursive quad-tree for broadphase collision detection.
//
// Items land at the shallowest node whose region fully contains their
// bounding area; items straddling a quadrant boundary stay at the parent.
// The tree is rebuilt every simulation step (clear + reinsert) rather than
// incrementally maintained.

use super::bounding_area::BoundingArea;
use crate::math::vec2::Vec2;

/// Default number of items a node holds before subdividing.
const DEFAULT_NODE_CAPACITY: usize = 4;

/// Depth guard against pathological inputs (many identical bounding areas).
const MAX_DEPTH: usize = 16;

/// A quad-tree node over a bounding region.
#[derive(Debug)]
pub struct QuadTree<T> {
    region: BoundingArea,
    capacity: usize,
    depth: usize,
    items: Vec<(T, BoundingArea)>,
    children: Option<Box<[QuadTree<T>; 4]>>,
}

impl<T: Copy> QuadTree<T> {
    /// Creates an empty tree over the given region.
    pub fn new(region: BoundingArea) -> Self {
        Self::with_capacity(region, DEFAULT_NODE_CAPACITY)
    }

    /// Creates an empty tree with an explicit per-node capacity threshold.
    pub fn with_capacity(region: BoundingArea, capacity: usize) -> Self {
        log::trace!(
            "creating quad-tree: region={:?}, capacity={}",
            region,
            capacity
        );
        Self::node(region, capacity.max(1), 0)
    }

    /// A tree rooted over effectively unbounded extents, so that any finite
    /// bounding area fits inside it.
    pub fn unbounded() -> Self {
        const EXTENT: f64 = 1e12;
        Self::new(BoundingArea::new(
            Vec2::new(-EXTENT, -EXTENT),
            Vec2::new(EXTENT, EXTENT),
        ))
    }

    fn node(region: BoundingArea, capacity: usize, depth: usize) -> Self {
        QuadTree {
            region,
            capacity,
            depth,
            items: Vec::new(),
            children: None,
        }
    }

    /// The region this node covers.
    pub fn region(&self) -> BoundingArea {
        self.region
    }

    /// Total number of items stored in this subtree.
    pub fn len(&self) -> usize {
        let mut count = self.items.len();
        if let Some(children) = &self.children {
            for child in children.iter() {
                count += child.len();
            }
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties all nodes. The root region is retained; child nodes are dropped.
    pub fn clear(&mut self) {
        self.items.clear();
        self.children = None;
    }

    /// Inserts an item with its bounding area. Items with empty bounds are
    /// ignored; they can never be retrieved by an overlap query.
    pub fn insert(&mut self, item: T, bounds: BoundingArea) {
        if bounds.is_empty() {
            return;
        }

        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if child.region.contains(&bounds) {
                    child.insert(item, bounds);
                    return;
                }
            }
            // Straddles a quadrant boundary: stays at this node
            self.items.push((item, bounds));
            return;
        }

        self.items.push((item, bounds));
        if self.items.len() > self.capacity && self.depth < MAX_DEPTH {
            self.subdivide();
        }
    }

    /// Returns every item stored in any node whose region overlaps `area`,
    /// descending only into overlapping quadrants. The result is a superset
    /// of the items that truly overlap; callers must re-validate with a
    /// narrow-phase test. Empty or degenerate query areas yield nothing.
    pub fn retrieve_potential_collisions(&self, area: &BoundingArea) -> Vec<T> {
        let mut results = Vec::new();
        if !area.is_empty() {
            self.collect_overlapping(area, &mut results);
        }
        results
    }

    fn collect_overlapping(&self, area: &BoundingArea, results: &mut Vec<T>) {
        if !self.region.overlaps(area) {
            return;
        }
        for (item, _) in &self.items {
            results.push(*item);
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_overlapping(area, results);
            }
        }
    }

    /// Splits this node into four quadrants and pushes down every item that
    /// fits entirely within one of them.
    fn subdivide(&mut self) {
        let center = (self.region.min + self.region.max) / 2.0;
        let min = self.region.min;
        let max = self.region.max;
        let depth = self.depth + 1;

        let mut children = Box::new([
            Self::node(BoundingArea::new(min, center), self.capacity, depth),
            Self::node(
                BoundingArea::new(Vec2::new(center.x, min.y), Vec2::new(max.x, center.y)),
                self.capacity,
                depth,
            ),
            Self::node(
                BoundingArea::new(Vec2::new(min.x, center.y), Vec2::new(center.x, max.y)),
                self.capacity,
                depth,
            ),
            Self::node(BoundingArea::new(center, max), self.capacity, depth),
        ]);

        let items = std::mem::take(&mut self.items);
        'items: for (item, bounds) in items {
            for child in children.iter_mut() {
                if child.region.contains(&bounds) {
                    child.insert(item, bounds);
                    continue 'items;
                }
            }
            self.items.push((item, bounds));
        }

        self.children = Some(children);
    }
}
