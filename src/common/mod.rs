pub mod error;
pub mod layers;
pub mod material;

pub use error::PhysicsError;
pub use layers::{LayerSettings, ALL_LAYERS, DEFAULT_LAYER, MAX_LAYERS};
pub use material::PhysicsMaterial;
