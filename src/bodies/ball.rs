use crate::bodies::BallFlags;
use crate::error::PhysicsError;
use crate::math::Vector3;
use crate::surface::SurfaceOracle;
use crate::Result;

/// Cutoff below which the energy-preserving rescale is skipped.
///
/// The rescale compensates for speed lost when the velocity is projected
/// onto the tangent plane; it is a tuned heuristic, not an exact law.
const ENERGY_RESCALE_EPSILON: f32 = 1.0e-4;

/// Speed band enforced by the steering nudges
const NUDGE_SPEED_LIMIT: f32 = 8.0;

/// Velocity added per steering nudge
const NUDGE_IMPULSE: f32 = 1.0;

/// Decay applied while a nudged component sits outside the speed band
const NUDGE_DECAY: f32 = 0.9;

/// Damping applied to the other lateral component on each nudge
const NUDGE_LATERAL_DAMP: f32 = 0.5;

/// A rigid spherical body rolling on the reference surface.
///
/// The tentative per-step motion is kept in `displacement` and only applied
/// to `position` when the step driver commits it; that split is what lets
/// the driver truncate motion at a collision time and integrate the rest of
/// the step under a new velocity.
pub struct Ball {
    /// The ball's center in world space
    position: Vector3,

    /// The ball's linear velocity
    velocity: Vector3,

    /// The ball's mass
    mass: f32,

    /// The ball's radius
    radius: f32,

    /// Tentative motion for the current step, recomputed by `integrate`
    displacement: Vector3,

    /// Cached surface parameters, seeds the next closest-point query
    surface_param: (f32, f32),

    /// How far into the current step this ball's state is valid
    time_fraction: f32,

    /// The ball's flags
    flags: BallFlags,
}

impl Ball {
    /// Creates a new surface-constrained ball.
    ///
    /// Mass and radius must be strictly positive.
    pub fn new(position: Vector3, velocity: Vector3, mass: f32, radius: f32) -> Result<Self> {
        if mass <= 0.0 || !mass.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "ball mass must be positive, got {}",
                mass
            )));
        }
        if radius <= 0.0 || !radius.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "ball radius must be positive, got {}",
                radius
            )));
        }

        Ok(Self {
            position,
            velocity,
            mass,
            radius,
            displacement: Vector3::zero(),
            surface_param: (0.0, 0.0),
            time_fraction: 0.0,
            flags: BallFlags::default(),
        })
    }

    /// Computes the ball's tentative displacement for a step of length `dt`.
    ///
    /// The free-flight displacement under gravity is snapped onto the
    /// surface shell at the ball's radius offset, the velocity is projected
    /// onto the local tangent plane, and its magnitude is rescaled so the
    /// speed stays consistent with the surface drop. `position` is left
    /// untouched; the driver commits the displacement at the end of the
    /// tick.
    pub fn integrate(&mut self, dt: f32, surface: &dyn SurfaceOracle, gravity: Vector3) {
        let old_velocity = self.velocity;
        let mut disp = self.velocity * dt + gravity * (0.5 * dt * dt);

        if self.flags.contains(BallFlags::SURFACE_CONSTRAINED) {
            let sample = surface.closest_point(self.position + disp, self.surface_param);
            self.surface_param = sample.param;
            let normal = sample.normal;

            disp = sample.point + normal * self.radius - self.position;

            // Kinetic + potential proxy before the tangential projection
            let v1 = old_velocity.dot(&old_velocity) + 2.0 * gravity.dot(&disp);

            self.velocity += gravity * dt;
            self.velocity -= normal * self.velocity.dot(&normal);

            let v2 = self.velocity.dot(&self.velocity);
            if v2 > ENERGY_RESCALE_EPSILON && v1 > ENERGY_RESCALE_EPSILON {
                self.velocity *= (v1 / v2).sqrt();
            }
        } else {
            self.velocity += gravity * dt;
        }

        if !self.velocity.is_zero() {
            self.flags.remove(BallFlags::AT_REST);
        }

        self.displacement = disp;
    }

    /// Applies the pending displacement to the ball's position
    pub(crate) fn commit_displacement(&mut self) {
        self.position += self.displacement;
    }

    /// Returns the ball's position
    pub fn get_position(&self) -> Vector3 {
        self.position
    }

    /// Sets the ball's position
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    /// Moves the ball's position by the given delta
    pub(crate) fn translate(&mut self, delta: Vector3) {
        self.position += delta;
    }

    /// Returns the ball's velocity
    pub fn get_velocity(&self) -> Vector3 {
        self.velocity
    }

    /// Sets the ball's velocity
    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
        if !velocity.is_zero() {
            self.flags.remove(BallFlags::AT_REST);
        }
    }

    /// Brings the ball to rest: velocity and pending displacement are zeroed
    pub(crate) fn bring_to_rest(&mut self) {
        self.velocity = Vector3::zero();
        self.displacement = Vector3::zero();
        self.flags.insert(BallFlags::AT_REST);
    }

    /// Returns the ball's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Returns the ball's radius
    pub fn get_radius(&self) -> f32 {
        self.radius
    }

    /// Returns the tentative displacement for the current step
    pub fn get_displacement(&self) -> Vector3 {
        self.displacement
    }

    /// Returns the cached surface parameters
    pub fn get_surface_param(&self) -> (f32, f32) {
        self.surface_param
    }

    /// Returns how far into the current step this ball has been resolved
    pub fn get_time_fraction(&self) -> f32 {
        self.time_fraction
    }

    /// Stamps the fraction of the step consumed by the last resolution
    pub(crate) fn set_time_fraction(&mut self, time_fraction: f32) {
        self.time_fraction = time_fraction;
    }

    /// Resets the per-tick state at the start of a new step
    pub(crate) fn begin_tick(&mut self) {
        self.time_fraction = 0.0;
    }

    /// Returns the ball's flags
    pub fn get_flags(&self) -> BallFlags {
        self.flags
    }

    /// Returns whether the ball is resting after a low-speed wall contact
    pub fn is_at_rest(&self) -> bool {
        self.flags.contains(BallFlags::AT_REST)
    }

    /// Enables or disables the rolling constraint for this ball
    pub fn set_surface_constrained(&mut self, constrained: bool) {
        self.flags.set(BallFlags::SURFACE_CONSTRAINED, constrained);
    }

    /// Returns whether the ball follows the surface constraint
    pub fn is_surface_constrained(&self) -> bool {
        self.flags.contains(BallFlags::SURFACE_CONSTRAINED)
    }

    /// Steering bump along the world x axis; `dir` is +1.0 or -1.0
    pub fn nudge_x(&mut self, dir: f32) {
        let (mut vx, mut vy) = (self.velocity.x, self.velocity.y);
        Self::nudge_component(&mut vx, &mut vy, dir.signum());
        self.velocity.x = vx;
        self.velocity.y = vy;
        self.flags.remove(BallFlags::AT_REST);
    }

    /// Steering bump along the world y axis; `dir` is +1.0 or -1.0
    pub fn nudge_y(&mut self, dir: f32) {
        let (mut vy, mut vx) = (self.velocity.y, self.velocity.x);
        Self::nudge_component(&mut vy, &mut vx, dir.signum());
        self.velocity.x = vx;
        self.velocity.y = vy;
        self.flags.remove(BallFlags::AT_REST);
    }

    /// Pushes `value` toward `dir` inside the speed band, damping the other
    /// lateral component; outside the band the component decays back in.
    fn nudge_component(value: &mut f32, other: &mut f32, dir: f32) {
        if value.abs() < NUDGE_SPEED_LIMIT {
            if *value * dir < 0.0 {
                *value = 0.0;
            }
            *value += NUDGE_IMPULSE * dir;
            *other *= NUDGE_LATERAL_DAMP;
        } else {
            while value.abs() >= NUDGE_SPEED_LIMIT {
                *value *= NUDGE_DECAY;
            }
        }
    }

    /// The axis the ball spins around for its pending displacement, paired
    /// with the roll angle in radians. For a host renderer; pure read.
    pub fn roll_axis(&self, surface_normal: Vector3) -> (Vector3, f32) {
        let axis = surface_normal.cross(&self.displacement);
        let angle = self.displacement.length() / self.radius;
        (axis, angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_with_velocity(velocity: Vector3) -> Ball {
        let mut ball = Ball::new(Vector3::zero(), velocity, 1.0, 0.5).unwrap();
        ball.set_surface_constrained(true);
        ball
    }

    #[test]
    fn rejects_non_positive_mass_and_radius() {
        assert!(Ball::new(Vector3::zero(), Vector3::zero(), 0.0, 1.0).is_err());
        assert!(Ball::new(Vector3::zero(), Vector3::zero(), -1.0, 1.0).is_err());
        assert!(Ball::new(Vector3::zero(), Vector3::zero(), 1.0, 0.0).is_err());
    }

    #[test]
    fn nudge_bumps_and_damps_lateral() {
        let mut ball = ball_with_velocity(Vector3::new(4.0, 2.0, 0.0));
        ball.nudge_y(1.0);
        let v = ball.get_velocity();
        assert_eq!(v.y, 3.0);
        assert_eq!(v.x, 2.0);
    }

    #[test]
    fn nudge_zeroes_opposing_component_first() {
        let mut ball = ball_with_velocity(Vector3::new(0.0, -3.0, 0.0));
        ball.nudge_y(1.0);
        assert_eq!(ball.get_velocity().y, 1.0);
    }

    #[test]
    fn nudge_decays_runaway_component_back_into_band() {
        let mut ball = ball_with_velocity(Vector3::new(9.5, 0.0, 0.0));
        ball.nudge_x(1.0);
        let vx = ball.get_velocity().x;
        assert!(vx < NUDGE_SPEED_LIMIT);
        assert!(vx > 0.0);
    }

    #[test]
    fn setting_velocity_wakes_resting_ball() {
        let mut ball = ball_with_velocity(Vector3::zero());
        ball.bring_to_rest();
        assert!(ball.is_at_rest());
        ball.set_velocity(Vector3::new(1.0, 0.0, 0.0));
        assert!(!ball.is_at_rest());
    }
}
