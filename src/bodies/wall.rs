use crate::error::PhysicsError;
use crate::math::Vector3;
use crate::Result;

/// A planar boundary obstacle.
///
/// Defined by a point on the plane and an outward-facing unit normal (the
/// side the balls live on). Walls are immutable after construction and are
/// stateless collaborators during a step.
#[derive(Debug, Clone)]
pub struct Wall {
    /// A point on the wall's plane
    point: Vector3,

    /// The outward unit normal of the plane
    normal: Vector3,
}

impl Wall {
    /// Creates a new wall from a point on its plane and an outward normal.
    ///
    /// The normal is normalized; a zero normal is rejected.
    pub fn new(point: Vector3, normal: Vector3) -> Result<Self> {
        if normal.is_zero() {
            return Err(PhysicsError::InvalidParameter(
                "wall normal must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            point,
            normal: normal.normalize(),
        })
    }

    /// Returns a point on the wall's plane
    pub fn get_point(&self) -> Vector3 {
        self.point
    }

    /// Returns the wall's outward unit normal
    pub fn get_normal(&self) -> Vector3 {
        self.normal
    }

    /// Returns the closest point on the wall's plane to the given point
    pub fn closest_point(&self, point: Vector3) -> Vector3 {
        point - self.normal * self.signed_distance(point)
    }

    /// Returns the signed distance from a point to the plane, positive on
    /// the outward side
    pub fn signed_distance(&self, point: Vector3) -> f32 {
        self.normal.dot(&(point - self.point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn closest_point_drops_normal_component() {
        let wall = Wall::new(Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 2.0)).unwrap();
        let p = wall.closest_point(Vector3::new(3.0, 4.0, 5.0));
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-6);
        assert_relative_eq!(wall.get_normal().length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rejects_zero_normal() {
        assert!(Wall::new(Vector3::zero(), Vector3::zero()).is_err());
    }
}
