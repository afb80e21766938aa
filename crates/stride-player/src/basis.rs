//! Camera-relative movement basis and look rotations.
//!
//! Convention throughout the crate: +Y is up, +Z is forward and +X is right
//! for an unrotated transform.

use glam::{Mat3, Quat, Vec2, Vec3};

/// Anything that can report a camera's forward and right unit vectors.
pub trait CameraOrientationSource {
    /// Unit vector the camera looks along.
    fn forward(&self) -> Vec3;
    /// Unit vector pointing to the camera's right.
    fn right(&self) -> Vec3;
}

impl CameraOrientationSource for Quat {
    fn forward(&self) -> Vec3 {
        *self * Vec3::Z
    }

    fn right(&self) -> Vec3 {
        *self * Vec3::X
    }
}

/// Horizontal forward/right axes derived from a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementBasis {
    /// Camera forward with the vertical component removed, normalized.
    pub forward: Vec3,
    /// Camera right with the vertical component removed, normalized.
    pub right: Vec3,
}

impl MovementBasis {
    /// Projects the camera's axes onto the horizontal plane.
    ///
    /// When the camera looks straight up or down the projected forward has no
    /// length and collapses to zero; movement along that axis is then lost.
    pub fn from_camera(camera: &impl CameraOrientationSource) -> Self {
        Self {
            forward: flatten(camera.forward()),
            right: flatten(camera.right()),
        }
    }

    /// World-space unit direction for a 2D move input, or zero for no input.
    #[must_use]
    pub fn direction(&self, move_input: Vec2) -> Vec3 {
        (self.forward * move_input.y + self.right * move_input.x).normalize_or_zero()
    }
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Rotation whose +Z axis points along `forward` with +Y as close to `up` as possible.
///
/// Returns `None` when `forward` is zero or parallel to `up`.
#[must_use]
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let right = up.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
}
