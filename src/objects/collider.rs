use serde::{Deserialize, Serialize};

use crate::collision::bounding_area::BoundingArea;
use crate::common::layers::DEFAULT_LAYER;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::shapes::Shape;

/// Margin applied to computed bounds so flat shapes (axis-aligned segments)
/// keep extent on both axes and survive the broad phase.
const BOUNDS_MARGIN: f64 = 1e-3;

/// A collision shape attached to a body, together with its layer bitmask and
/// trigger flag. Bounding areas are cached per transform; any mutation of the
/// shape invalidates the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collider {
    shape: Shape,
    layers: u32,
    is_trigger: bool,
    #[serde(skip)]
    cached_bounds: Option<(Transform, BoundingArea)>,
}

impl Collider {
    /// Creates a solid collider on the default layer.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            layers: DEFAULT_LAYER,
            is_trigger: false,
            cached_bounds: None,
        }
    }

    /// Creates a trigger collider: overlaps are reported but never resolved.
    pub fn new_trigger(shape: Shape) -> Self {
        let mut collider = Self::new(shape);
        collider.is_trigger = true;
        collider
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.cached_bounds = None;
    }

    /// The layer bitmask this collider belongs to.
    pub fn layers(&self) -> u32 {
        self.layers
    }

    pub fn set_layers(&mut self, layers: u32) {
        self.layers = layers;
    }

    pub fn is_trigger(&self) -> bool {
        self.is_trigger
    }

    pub fn set_trigger(&mut self, is_trigger: bool) {
        self.is_trigger = is_trigger;
    }

    /// The world-space bounding area under `transform`, cached until the
    /// transform or shape changes.
    pub fn bounding_area(&mut self, transform: &Transform) -> BoundingArea {
        if let Some((cached_transform, cached)) = &self.cached_bounds {
            if cached_transform == transform {
                return *cached;
            }
        }
        let bounds = self.compute_bounding_area(transform);
        self.cached_bounds = Some((*transform, bounds));
        bounds
    }

    /// Computes the world-space bounding area without touching the cache.
    /// Shapes with no extent yield `BoundingArea::EMPTY`.
    pub fn compute_bounding_area(&self, transform: &Transform) -> BoundingArea {
        match &self.shape {
            Shape::Circle(circle) => {
                let radius = circle.radius * transform.max_scale();
                if radius <= 0.0 {
                    return BoundingArea::EMPTY;
                }
                let extent = Vec2::new(radius, radius);
                let center = transform.position;
                BoundingArea::new(center - extent, center + extent)
            }
            Shape::Line(segment) => {
                let points = [transform.apply(segment.start), transform.apply(segment.end)];
                match BoundingArea::from_points(&points) {
                    Some(bounds) => bounds.inflated(BOUNDS_MARGIN),
                    None => BoundingArea::EMPTY,
                }
            }
            Shape::LineStrip(strip) => {
                if strip.points.len() < 2 {
                    return BoundingArea::EMPTY;
                }
                let points: Vec<Vec2> =
                    strip.points.iter().map(|p| transform.apply(*p)).collect();
                match BoundingArea::from_points(&points) {
                    Some(bounds) => bounds.inflated(BOUNDS_MARGIN),
                    None => BoundingArea::EMPTY,
                }
            }
            Shape::Polygon(polygon) => {
                let points: Vec<Vec2> =
                    polygon.vertices.iter().map(|v| transform.apply(*v)).collect();
                match BoundingArea::from_points(&points) {
                    Some(bounds) => bounds.inflated(BOUNDS_MARGIN),
                    None => BoundingArea::EMPTY,
                }
            }
        }
    }
}
