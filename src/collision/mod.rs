pub mod bounding_area;
pub mod detection;
pub mod manifold;
pub mod quad_tree;
pub mod raycast;

// Re-export key types
pub use bounding_area::BoundingArea;
pub use detection::check_collision;
pub use manifold::{CollisionManifold, ContactPoint};
pub use quad_tree::QuadTree;
pub use raycast::{Ray, RaycastHit};
