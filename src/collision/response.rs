use crate::bodies::{Ball, Wall};
use crate::core::SimulationConfig;
use crate::surface::SurfaceOracle;

/// Resolves a ball-wall contact by reflecting the velocity about the wall
/// normal.
///
/// A reflected speed at or below the configured rest threshold brings the
/// ball to rest instead, so slow contacts do not jitter against the wall.
/// Otherwise the ball re-integrates to consume the remainder of the step
/// under the reflected velocity.
pub fn resolve_ball_wall(
    ball: &mut Ball,
    wall: &Wall,
    dt_remaining: f32,
    surface: &dyn SurfaceOracle,
    config: &SimulationConfig,
) {
    let reflected = ball.get_velocity().reflect(&wall.get_normal());

    if reflected.length() <= config.rest_speed_threshold {
        ball.bring_to_rest();
    } else {
        ball.set_velocity(reflected);
        ball.integrate(dt_remaining, surface, config.gravity);
    }
}

/// Resolves a ball-ball contact with a 1-D elastic exchange along the
/// contact normal.
///
/// Each velocity is split into its component along the center-to-center
/// axis and the tangential remainder; the axial components trade according
/// to the elastic collision formulas for masses `m1`, `m2` and the
/// tangential parts are kept. Both balls then re-integrate for the rest of
/// the step.
pub fn resolve_ball_ball(
    b1: &mut Ball,
    b2: &mut Ball,
    dt_remaining: f32,
    surface: &dyn SurfaceOracle,
    config: &SimulationConfig,
) {
    let axis = (b2.get_position() - b1.get_position()).normalize();

    let v1 = b1.get_velocity();
    let v2 = b2.get_velocity();
    let v1_axial = axis * v1.dot(&axis);
    let v1_tangent = v1 - v1_axial;
    let v2_axial = axis * v2.dot(&axis);
    let v2_tangent = v2 - v2_axial;

    let m1 = b1.get_mass();
    let m2 = b2.get_mass();
    let mass_sum = m1 + m2;

    let v1_axial_after = v1_axial * ((m1 - m2) / mass_sum) + v2_axial * (2.0 * m2 / mass_sum);
    let v2_axial_after = v2_axial * ((m2 - m1) / mass_sum) + v1_axial * (2.0 * m1 / mass_sum);

    b1.set_velocity(v1_axial_after + v1_tangent);
    b2.set_velocity(v2_axial_after + v2_tangent);

    b1.integrate(dt_remaining, surface, config.gravity);
    b2.integrate(dt_remaining, surface, config.gravity);
}
