use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the simulation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Gravitational acceleration applied to every ball
    pub gravity: Vector3,

    /// Speed at or below which a reflected wall contact comes to rest
    pub rest_speed_threshold: f32,

    /// Upper bound on contact events processed in a single tick; an
    /// oscillating contact that keeps regenerating events is cut off here
    /// and the tick committed as-is
    pub max_contact_events: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vector3::new(0.0, 0.0, -9.8),
            rest_speed_threshold: 0.1,
            max_contact_events: 256,
        }
    }
}
