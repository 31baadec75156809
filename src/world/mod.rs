pub mod physics_world;

// Re-export key types
pub use physics_world::{CollisionRecord, PhysicsSettings, PhysicsWorld};
