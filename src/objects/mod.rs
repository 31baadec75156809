pub mod body;
pub mod collider;

// Re-export key types
pub use body::PhysicsBody;
pub use collider::Collider;
