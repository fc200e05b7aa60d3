pub mod math;
pub mod surface;
pub mod bodies;
pub mod collision;
pub mod core;

/// Re-export common types for easier usage
pub use crate::core::{SimulationWorld, SimulationConfig, StepReport, BallHandle, WallHandle};
pub use crate::bodies::{Ball, Wall, BallFlags};
pub use crate::surface::{SurfaceOracle, SurfaceSample};
pub use crate::math::Vector3;

/// Error types for the simulation
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Simulation stability error: {0}")]
        SimulationError(String),
    }
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
