pub mod circle;
pub mod line_segment;
pub mod line_strip;
pub mod polygon;

pub use circle::Circle;
pub use line_segment::LineSegment;
pub use line_strip::LineStrip;
pub use polygon::Polygon;

use serde::{Deserialize, Serialize};

/// The geometric shape of a collider, as a tagged union over the four
/// supported variants. Intersection tests dispatch on pairs of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Line(LineSegment),
    LineStrip(LineStrip),
    Polygon(Polygon),
}
