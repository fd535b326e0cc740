//! Frame-rate aware interpolation and look-at helpers

use glam::Vec3;

use crate::Rotator;

/// Squared distance below which interpolation snaps to the target
const SNAP_DISTANCE_SQUARED: f32 = 1.0e-4;

/// Move `current` towards `target` by a fraction of the remaining distance.
///
/// The fraction is `dt * speed` clamped to `[0, 1]`, so the step shrinks as the
/// target gets closer. A non-positive speed jumps straight to the target.
pub fn vinterp_to(current: Vec3, target: Vec3, dt: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }

    let dist = target - current;
    if dist.length_squared() < SNAP_DISTANCE_SQUARED {
        return target;
    }

    current + dist * (dt * speed).clamp(0.0, 1.0)
}

/// Rotation whose forward vector points from `start` at `target`. Roll is zero.
pub fn find_look_at_rotation(start: Vec3, target: Vec3) -> Rotator {
    let dir = target - start;
    let yaw = dir.y.atan2(dir.x).to_degrees();
    let pitch = dir.z.atan2(dir.truncate().length()).to_degrees();
    Rotator::new(pitch, yaw, 0.0)
}
