pub mod world;
pub mod config;
pub mod storage;

pub use self::world::SimulationWorld;
pub use self::config::SimulationConfig;
pub use self::storage::{BallStorage, WallStorage, Storage};

/// A unique identifier for a ball in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BallHandle(pub(crate) u32);

/// A unique identifier for a wall in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallHandle(pub(crate) u32);

/// Summary of one completed tick
#[derive(Debug, Clone, Copy, Default)]
pub struct StepReport {
    /// Number of contact events resolved during the tick
    pub events_resolved: u32,

    /// Whether the tick hit the per-tick event bound and committed early
    pub truncated: bool,
}
