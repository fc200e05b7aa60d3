use approx::abs_diff_eq;

use crate::bodies::{Ball, Wall};
use crate::math::EPSILON;

/// Below this the swept pair has no relative motion and no finite-time root
const RELATIVE_MOTION_EPSILON: f32 = 1.0e-7;

/// Minimum closing rate along a wall normal for an impact to be considered
const CLOSING_RATE_EPSILON: f32 = 1.0e-8;

/// Fraction of the overlap each ball is pushed out along the pair axis;
/// slightly more than half so the corrected pair does not re-trigger
const SEPARATION_FACTOR: f32 = 0.51;

/// Finds the earliest time of impact between two swept spheres.
///
/// Solves `a*t^2 + b*t + c = 0` over the relative displacement of the pair
/// and accepts the earlier root when it falls inside `(prev_time, 1]`.
/// If the spheres already overlap at the start of the window the pair is
/// pushed apart first and the coefficients recomputed; that corrective
/// translation is the only side effect of this function.
pub fn ball_ball_toi(b1: &mut Ball, b2: &mut Ball, prev_time: f32) -> Option<f32> {
    let rel_disp = b1.get_displacement() - b2.get_displacement();
    let mut rel_pos = b1.get_position() - b2.get_position();
    let sum_radius = b1.get_radius() + b2.get_radius();

    let a = rel_disp.dot(&rel_disp);
    if abs_diff_eq!(a, 0.0, epsilon = RELATIVE_MOTION_EPSILON) {
        return None;
    }

    let mut b = 2.0 * rel_pos.dot(&rel_disp);
    let mut c = rel_pos.dot(&rel_pos) - sum_radius * sum_radius;

    if c < 0.0 {
        // Already overlapping from drift or an earlier partial resolution:
        // separate the pair so the root-finding stays well-posed.
        let distance = rel_pos.length();
        if distance > EPSILON {
            let correction = SEPARATION_FACTOR * (sum_radius - distance) / distance;
            b1.translate(rel_pos * correction);
            b2.translate(-(rel_pos * correction));

            rel_pos *= 1.0 + 2.0 * correction;
            b = 2.0 * rel_pos.dot(&rel_disp);
            c = rel_pos.dot(&rel_pos) - sum_radius * sum_radius;
        }
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant <= 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if prev_time < t && t <= 1.0 {
        Some(t)
    } else {
        None
    }
}

/// Finds the time of impact between a swept sphere and a wall plane.
///
/// Linear in the displacement's closing rate along the wall normal. A ball
/// already past the wall shell is translated back out before the time is
/// computed; that is the only side effect.
pub fn ball_wall_toi(ball: &mut Ball, wall: &Wall, prev_time: f32) -> Option<f32> {
    let normal = wall.get_normal();
    let radius = ball.get_radius();

    let d = wall.closest_point(ball.get_position()) - ball.get_position();
    let mut dn = d.dot(&normal);

    if dn + radius > 0.0 {
        // Already inside the wall shell: reflect the ball's position out.
        ball.translate(normal * (2.0 * (dn + radius)));
        dn -= 2.0 * (dn + radius);
    }

    let closing_rate = ball.get_displacement().dot(&normal);
    if closing_rate < -CLOSING_RATE_EPSILON {
        let t = (radius + dn) / closing_rate;
        if prev_time < t && t <= 1.0 {
            return Some(t);
        }
    }

    None
}
