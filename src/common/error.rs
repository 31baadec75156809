use thiserror::Error;

/// Configuration errors rejected eagerly, before they can reach the simulation.
/// Simulation data itself never errors; degenerate geometry degrades to
/// "no collision" instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicsError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error("degenerate shape: {0}")]
    DegenerateShape(&'static str),

    #[error("collision layer index {0} out of range (0..32)")]
    InvalidLayer(usize),
}
