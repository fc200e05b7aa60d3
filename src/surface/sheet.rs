use nalgebra as na;

use crate::math::Vector3;
use crate::surface::{SurfaceOracle, SurfaceSample};

/// A planar bilinear patch spanned by four corners.
///
/// Parameterized as `S(u,v) = p1 + u*(p2-p1) + v*(p4-p1 + u*(p1-p2+p3-p4))`
/// with `(u,v)` in `[0,1]x[0,1]` extended over the whole plane. The corners
/// are expected to be coplanar; the twist term then vanishes from the normal
/// and the closest point is a plane projection.
#[derive(Debug, Clone)]
pub struct FlatSheet {
    p1: Vector3,
    p2: Vector3,
    p3: Vector3,
    p4: Vector3,
}

impl FlatSheet {
    /// Creates a new sheet from its four corners, in winding order
    pub fn new(p1: Vector3, p2: Vector3, p3: Vector3, p4: Vector3) -> Self {
        Self { p1, p2, p3, p4 }
    }

    /// Creates an axis-aligned horizontal sheet at height `z`, centered on
    /// the origin with the given half extent
    pub fn horizontal(z: f32, half_extent: f32) -> Self {
        Self::new(
            Vector3::new(-half_extent, -half_extent, z),
            Vector3::new(half_extent, -half_extent, z),
            Vector3::new(half_extent, half_extent, z),
            Vector3::new(-half_extent, half_extent, z),
        )
    }

    /// Evaluates the patch at the given parameters
    pub fn eval(&self, u: f32, v: f32) -> Vector3 {
        let twist = self.p1 - self.p2 + self.p3 - self.p4;
        self.p1 + (self.p2 - self.p1) * u + (self.p4 - self.p1 + twist * u) * v
    }

    /// The tangent pair at the given parameters
    pub fn tangents(&self, u: f32, v: f32) -> (Vector3, Vector3) {
        let twist = self.p1 - self.p2 + self.p3 - self.p4;
        let su = self.p2 - self.p1 + twist * v;
        let sv = self.p4 - self.p1 + twist * u;
        (su, sv)
    }
}

impl SurfaceOracle for FlatSheet {
    fn closest_point(&self, query: Vector3, _hint: (f32, f32)) -> SurfaceSample {
        // Parameters from the least-squares solution of the linear part:
        // [su sv] * (u,v)^T = query - p1, solved via the 2x2 normal equations.
        let su = self.p2 - self.p1;
        let sv = self.p4 - self.p1;
        let rhs = query - self.p1;

        let gram = na::Matrix2::new(
            su.dot(&su), su.dot(&sv),
            sv.dot(&su), sv.dot(&sv),
        );
        let proj = na::Vector2::new(su.dot(&rhs), sv.dot(&rhs));
        let (u, v) = match gram.try_inverse() {
            Some(inv) => {
                let uv = inv * proj;
                (uv.x, uv.y)
            }
            // Degenerate corners collapse the patch; fall back to its origin.
            None => (0.0, 0.0),
        };

        let (tu, tv) = self.tangents(u, v);
        SurfaceSample {
            point: self.eval(u, v),
            normal: tu.cross(&tv).normalize(),
            param: (u, v),
        }
    }
}

/// A quadratic height sheet `z = z0 + a*x^2 + b*y^2` with an analytic
/// tangent frame.
///
/// The closest point is approximated by vertical projection, which is exact
/// for `a = b = 0` and close for gentle curvature; parameters are `(x, y)`.
#[derive(Debug, Clone)]
pub struct QuadraticSheet {
    z0: f32,
    a: f32,
    b: f32,
}

impl QuadraticSheet {
    /// Creates a new sheet with base height `z0` and curvatures `a`, `b`
    pub fn new(z0: f32, a: f32, b: f32) -> Self {
        Self { z0, a, b }
    }

    /// Creates a flat horizontal floor at height `z0`
    pub fn flat(z0: f32) -> Self {
        Self::new(z0, 0.0, 0.0)
    }

    /// The height of the sheet above `(x, y)`
    pub fn height(&self, x: f32, y: f32) -> f32 {
        self.z0 + self.a * x * x + self.b * y * y
    }
}

impl SurfaceOracle for QuadraticSheet {
    fn closest_point(&self, query: Vector3, _hint: (f32, f32)) -> SurfaceSample {
        let (u, v) = (query.x, query.y);
        let tu = Vector3::new(1.0, 0.0, 2.0 * self.a * u);
        let tv = Vector3::new(0.0, 1.0, 2.0 * self.b * v);
        SurfaceSample {
            point: Vector3::new(u, v, self.height(u, v)),
            normal: tu.cross(&tv).normalize(),
            param: (u, v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn horizontal_sheet_projects_straight_down() {
        let sheet = FlatSheet::horizontal(2.0, 10.0);
        let sample = sheet.closest_point(Vector3::new(3.0, -1.5, 7.0), (0.0, 0.0));

        assert_relative_eq!(sample.point.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(sample.point.y, -1.5, epsilon = 1e-5);
        assert_relative_eq!(sample.point.z, 2.0, epsilon = 1e-5);
        assert_relative_eq!(sample.normal.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn flat_sheet_normal_follows_winding() {
        // Swapping two corners flips the tangent frame and thus the normal.
        let sheet = FlatSheet::new(
            Vector3::new(-1.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(1.0, -1.0, 0.0),
            Vector3::new(-1.0, -1.0, 0.0),
        );
        let sample = sheet.closest_point(Vector3::zero(), (0.0, 0.0));
        assert_relative_eq!(sample.normal.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn quadratic_sheet_normal_tilts_against_slope() {
        let sheet = QuadraticSheet::new(0.0, 0.5, 0.0);
        let sample = sheet.closest_point(Vector3::new(1.0, 0.0, 5.0), (0.0, 0.0));

        assert_relative_eq!(sample.point.z, 0.5, epsilon = 1e-5);
        // Slope rises with x, so the outward normal leans toward -x.
        assert!(sample.normal.x < 0.0);
        assert!(sample.normal.z > 0.0);
        assert_relative_eq!(sample.normal.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn param_hint_round_trips() {
        let sheet = QuadraticSheet::flat(1.0);
        let first = sheet.closest_point(Vector3::new(0.25, -0.75, 3.0), (0.0, 0.0));
        let second = sheet.closest_point(Vector3::new(0.25, -0.75, 3.0), first.param);
        assert_eq!(first.param, second.param);
        assert_eq!(first.point, second.point);
    }
}
