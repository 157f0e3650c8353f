//! Scalar and angle helpers used by steering, turret aiming and tree falls.
//!
//! Headings are radians about the vertical axis; a heading `h` faces
//! `(sin h, 0, cos h)`.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

/// Wrap `value` into `[0, length)`.
pub fn repeat(value: f64, length: f64) -> f64 {
    value - (value / length).floor() * length
}

/// Signed shortest angular difference from `current` to `target`, in `(-π, π]`.
pub fn delta_angle(current: f64, target: f64) -> f64 {
    let mut delta = repeat(target - current, TAU);
    if delta > PI {
        delta -= TAU;
    }
    delta
}

/// Move `current` toward `target` by at most `max_delta`.
pub fn move_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    if (target - current).abs() <= max_delta {
        return target;
    }
    current + (target - current).signum() * max_delta
}

/// Move an angle toward `target` along the shortest arc, by at most `max_delta`.
///
/// Snaps to `target` exactly once within reach, so the result may differ from
/// `current` by a multiple of 2π.
pub fn move_towards_angle(current: f64, target: f64, max_delta: f64) -> f64 {
    let delta = delta_angle(current, target);
    if -max_delta < delta && delta < max_delta {
        return target;
    }
    move_towards(current, current + delta, max_delta)
}

/// Wrap an angle into `[-π, π)`.
pub fn normalize_radians(angle: f64) -> f64 {
    angle - TAU * ((angle + PI) / TAU).floor()
}

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Map a unit value onto `[min, max]`.
pub fn denormalize(normalized: f64, min: f64, max: f64) -> f64 {
    normalized * (max - min) + min
}

/// Unit forward vector for a heading.
pub fn heading_vector(heading: f64) -> DVec3 {
    DVec3::new(heading.sin(), 0.0, heading.cos())
}

/// Heading that faces along `v` on the ground plane.
pub fn heading_of(v: DVec3) -> f64 {
    v.x.atan2(v.z)
}
