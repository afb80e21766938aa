//! Critically-damped smoothing with carried velocity.

use glam::Vec3;

/// Smallest smoothing time accepted, to keep the spring frequency finite.
const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Moves `current` toward `target` like a critically damped spring.
///
/// `velocity` is the spring's state and must be carried between calls.
/// `smooth_time` is roughly the time needed to reach the target. The step uses
/// a rational approximation of `exp(-omega * dt)`, and the result is clamped so
/// it never passes the target.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Stop exactly on the target instead of crossing it.
    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }
    output
}
