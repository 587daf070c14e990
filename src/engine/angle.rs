//! Angle helpers shared by the projection and wall code.
//!
//! All angles are radians. Map angles live in `[0, 2π)`; view-relative
//! angles are re-centred into `[-π, π)` before they hit the axis table.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Normalise into `[0, 2π)`.
#[inline]
pub fn wrap(a: f32) -> f32 {
    let r = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negatives
    if r >= TAU { 0.0 } else { r }
}

/// Normalise into `[-π, π)`.
#[inline]
pub fn recenter(a: f32) -> f32 {
    let r = wrap(a);
    if r < PI { r } else { r - TAU }
}

/// Map angle of the direction from `from` towards `to`.
///
/// Uses the negated-argument arctangent, so a point straight down the
/// negative x axis sits at angle 0.
#[inline]
pub fn point_to_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    wrap((-d.y).atan2(-d.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn wrap_stays_in_range() {
        for a in [-10.0, -TAU, -1e-9, 0.0, 3.0, TAU, 20.0] {
            let w = wrap(a);
            assert!((0.0..TAU).contains(&w), "{a} -> {w}");
        }
        assert!((wrap(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn recenter_is_symmetric() {
        assert!((recenter(3.0 * FRAC_PI_2) + FRAC_PI_2).abs() < 1e-5);
        assert!((recenter(0.5) - 0.5).abs() < 1e-6);
        assert!((recenter(PI) + PI).abs() < 1e-5);
    }

    #[test]
    fn point_to_angle_axes() {
        let o = Vec2::ZERO;
        assert!(point_to_angle(o, vec2(-10.0, 0.0)).abs() < 1e-6);
        assert!((point_to_angle(o, vec2(0.0, -10.0)) - FRAC_PI_2).abs() < 1e-5);
        assert!((point_to_angle(o, vec2(10.0, 0.0)) - PI).abs() < 1e-5);
        assert!((point_to_angle(o, vec2(0.0, 10.0)) - 3.0 * FRAC_PI_2).abs() < 1e-5);
    }
}
