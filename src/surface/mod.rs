mod sheet;

pub use sheet::{FlatSheet, QuadraticSheet};

use crate::math::Vector3;

/// The result of a closest-point query against a reference surface
#[derive(Debug, Clone, Copy)]
pub struct SurfaceSample {
    /// The closest point on the surface in world space
    pub point: Vector3,

    /// The outward unit normal at that point (`tangent_u x tangent_v`)
    pub normal: Vector3,

    /// The surface parameters of the point, returned as a hint for the
    /// next query
    pub param: (f32, f32),
}

/// Closest-point oracle for the surface the balls are constrained to.
///
/// Implementations must be deterministic for a fixed surface and should be
/// continuous near previous query points. The `hint` parameter seeds the
/// search with the caller's last known parameters; it is an optimization,
/// never a correctness requirement.
pub trait SurfaceOracle {
    /// Returns the closest point on the surface to `query`, with its
    /// tangent-frame normal and parameters.
    fn closest_point(&self, query: Vector3, hint: (f32, f32)) -> SurfaceSample;
}
