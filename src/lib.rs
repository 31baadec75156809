pub mod collision;
pub mod common;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{BoundingArea, CollisionManifold, QuadTree, RaycastHit};
pub use common::{LayerSettings, PhysicsError, PhysicsMaterial, ALL_LAYERS, DEFAULT_LAYER};
pub use math::transform::Transform;
pub use math::vec2::Vec2;
pub use objects::{Collider, PhysicsBody};
pub use shapes::{Circle, LineSegment, LineStrip, Polygon, Shape};
pub use world::{CollisionRecord, PhysicsSettings, PhysicsWorld};
