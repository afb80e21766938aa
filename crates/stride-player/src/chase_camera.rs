//! Chase camera: player-steered orbit, damped follow and look-at.

use glam::{Quat, Vec2, Vec3};
use stride_config::{CameraConfig, ConfigError};
use tracing::{debug, warn};

use crate::basis::{CameraOrientationSource, look_rotation};
use crate::smoothing::smooth_damp;

/// Per-frame camera state. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Accumulated yaw. Unbounded.
    pub yaw: f32,
    /// Accumulated pitch, always inside the configured bounds.
    pub pitch: f32,
    /// Smoothed world position.
    pub position: Vec3,
    /// Follow spring velocity carried between frames.
    pub velocity: Vec3,
    /// Facing, toward the look-at point.
    pub rotation: Quat,
}

/// Orbital camera that trails a target from behind and above.
///
/// Positioning uses the accumulated yaw/pitch, while the final facing is a
/// separate look-at toward a point above the target. The two agree only when
/// the camera has caught up with its desired position.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    config: CameraConfig,
    state: CameraState,
    warned_missing: bool,
}

impl ChaseCamera {
    /// Creates a camera at `position` with zero yaw and pitch.
    pub fn new(config: CameraConfig, position: Vec3) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: CameraState {
                yaw: 0.0,
                pitch: 0.0,
                position,
                velocity: Vec3::ZERO,
                rotation: Quat::IDENTITY,
            },
            warned_missing: false,
        })
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn rotation(&self) -> Quat {
        self.state.rotation
    }

    /// Adds a look delta: x turns yaw, y tilts pitch (inverted), then pitch is clamped.
    ///
    /// Deltas with a NaN or infinite component are dropped whole.
    pub fn accumulate_look(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            debug!("Ignoring non-finite look delta {delta}");
            return;
        }
        let sensitivity = self.config.sensitivity;
        self.state.yaw += delta.x * sensitivity;
        self.state.pitch = (self.state.pitch - delta.y * sensitivity)
            .clamp(self.config.min_pitch, self.config.max_pitch);
    }

    /// Orbit rotation from the accumulated angles: yaw about Y, then pitch about X.
    pub fn orbit_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.state.yaw.to_radians())
            * Quat::from_rotation_x(self.state.pitch.to_radians())
    }

    /// Where the camera wants to be for a target at `target`.
    pub fn desired_position(&self, target: Vec3) -> Vec3 {
        target - self.orbit_rotation() * Vec3::Z * self.config.distance
            + Vec3::Y * self.config.height
    }

    /// Jumps straight to the desired position for `target` and faces it,
    /// discarding follow momentum.
    pub fn snap_to(&mut self, target: Vec3) {
        self.state.position = self.desired_position(target);
        self.state.velocity = Vec3::ZERO;
        self.face(target);
    }

    /// Runs one render frame after the target's transform is final.
    ///
    /// Missing target or look input makes the frame a no-op; the first such
    /// frame logs a warning. Returns whether the camera was updated.
    pub fn late_update(&mut self, target: Option<Vec3>, look: Option<Vec2>, dt: f32) -> bool {
        let (Some(target), Some(look)) = (target, look) else {
            if !self.warned_missing {
                warn!(
                    "Chase camera idle: target {}, look input {}",
                    if target.is_some() { "present" } else { "missing" },
                    if look.is_some() { "present" } else { "missing" },
                );
                self.warned_missing = true;
            }
            return false;
        };

        self.accumulate_look(look);
        let desired = self.desired_position(target);
        self.state.position = smooth_damp(
            self.state.position,
            desired,
            &mut self.state.velocity,
            self.config.follow_smooth_time,
            dt,
        );

        self.face(target);
        true
    }

    fn face(&mut self, target: Vec3) {
        let focus = target + Vec3::Y * self.config.look_at_height;
        match look_rotation(focus - self.state.position, Vec3::Y) {
            Some(rotation) => self.state.rotation = rotation,
            None => debug!("Chase camera directly above focus, keeping previous facing"),
        }
    }
}

impl CameraOrientationSource for ChaseCamera {
    fn forward(&self) -> Vec3 {
        self.state.rotation * Vec3::Z
    }

    fn right(&self) -> Vec3 {
        self.state.rotation * Vec3::X
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn camera() -> ChaseCamera {
        ChaseCamera::new(CameraConfig::default(), Vec3::ZERO).unwrap()
    }

    #[test]
    fn test_initial_angles_are_zero() {
        let cam = camera();
        assert_eq!(cam.state().yaw, 0.0);
        assert_eq!(cam.state().pitch, 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CameraConfig {
            min_pitch: 70.0,
            max_pitch: 10.0,
            ..Default::default()
        };
        assert!(ChaseCamera::new(config, Vec3::ZERO).is_err());
    }

    #[test]
    fn test_desired_position_behind_and_above() {
        let cam = camera();
        let desired = cam.desired_position(Vec3::ZERO);
        assert!((desired - Vec3::new(0.0, 2.0, -5.0)).length() < EPS, "desired={desired}");
    }

    #[test]
    fn test_desired_position_follows_yaw() {
        let mut cam = camera();
        // 45 units at sensitivity 2 is a quarter turn.
        cam.accumulate_look(Vec2::new(45.0, 0.0));
        let desired = cam.desired_position(Vec3::ZERO);
        assert!((desired - Vec3::new(-5.0, 2.0, 0.0)).length() < EPS, "desired={desired}");
    }

    #[test]
    fn test_positive_pitch_raises_camera() {
        let mut cam = camera();
        cam.accumulate_look(Vec2::new(0.0, -15.0));
        assert!((cam.state().pitch - 30.0).abs() < EPS);
        let desired = cam.desired_position(Vec3::ZERO);
        assert!(desired.y > 2.0);
        let horizontal = Vec2::new(desired.x, desired.z).length();
        assert!((horizontal - 5.0 * 30f32.to_radians().cos()).abs() < EPS);
    }

    #[test]
    fn test_pitch_always_clamped() {
        let mut cam = camera();
        let deltas = [1000.0, -1000.0, 3.0, -1e6, 1e6, 0.5, -25.0, 17.0];
        for dy in deltas {
            cam.accumulate_look(Vec2::new(1.0, dy));
            let pitch = cam.state().pitch;
            assert!((-30.0..=60.0).contains(&pitch), "pitch={pitch}");
        }
        cam.accumulate_look(Vec2::new(0.0, -1000.0));
        assert_eq!(cam.state().pitch, 60.0);
        cam.accumulate_look(Vec2::new(0.0, 1000.0));
        assert_eq!(cam.state().pitch, -30.0);
    }

    #[test]
    fn test_non_finite_look_ignored() {
        let mut cam = camera();
        cam.accumulate_look(Vec2::new(10.0, -5.0));
        let (yaw, pitch) = (cam.state().yaw, cam.state().pitch);
        for delta in [
            Vec2::new(f32::NAN, 0.0),
            Vec2::new(0.0, f32::NAN),
            Vec2::new(0.0, f32::INFINITY),
            Vec2::new(f32::INFINITY, f32::NEG_INFINITY),
        ] {
            cam.accumulate_look(delta);
            assert_eq!(cam.state().yaw, yaw);
            assert_eq!(cam.state().pitch, pitch);
        }

        assert!(cam.late_update(Some(Vec3::ZERO), Some(Vec2::new(f32::NAN, 1.0)), 0.016));
        assert!(cam.position().is_finite());
        assert!(cam.rotation().is_finite());
        assert_eq!(cam.state().yaw, yaw);
    }

    #[test]
    fn test_yaw_unbounded() {
        let mut cam = camera();
        for _ in 0..10 {
            cam.accumulate_look(Vec2::new(100.0, 0.0));
        }
        assert!((cam.state().yaw - 2000.0).abs() < EPS);
    }

    #[test]
    fn test_converges_on_stationary_target() {
        let mut cam = camera();
        let target = Vec3::new(3.0, 0.0, 4.0);
        for _ in 0..600 {
            assert!(cam.late_update(Some(target), Some(Vec2::ZERO), 1.0 / 60.0));
        }
        let desired = cam.desired_position(target);
        assert!((cam.position() - desired).length() < 1e-3);
    }

    #[test]
    fn test_faces_point_above_target() {
        let mut cam = camera();
        let target = Vec3::new(0.0, 0.0, 10.0);
        for _ in 0..300 {
            cam.late_update(Some(target), Some(Vec2::ZERO), 1.0 / 60.0);
        }
        let focus = target + Vec3::Y * 0.5;
        let expected = (focus - cam.position()).normalize();
        assert!((cam.forward() - expected).length() < EPS);
        assert!(cam.right().y.abs() < EPS);
    }

    #[test]
    fn test_missing_inputs_are_noop() {
        let mut cam = camera();
        let before = *cam.state();
        assert!(!cam.late_update(None, Some(Vec2::new(10.0, 10.0)), 0.016));
        assert!(!cam.late_update(Some(Vec3::X), None, 0.016));
        assert_eq!(*cam.state(), before);
        assert!(cam.warned_missing);
    }

    #[test]
    fn test_snap_to_places_and_faces() {
        let mut cam = camera();
        cam.snap_to(Vec3::new(1.0, 0.0, 1.0));
        assert!((cam.position() - Vec3::new(1.0, 2.0, -4.0)).length() < EPS);
        assert_eq!(cam.state().velocity, Vec3::ZERO);
        assert!(cam.forward().z > 0.9);
        assert!(cam.forward().y < 0.0);
    }

    #[test]
    fn test_look_applied_through_late_update() {
        let mut cam = camera();
        cam.late_update(Some(Vec3::ZERO), Some(Vec2::new(5.0, 2.0)), 0.016);
        assert!((cam.state().yaw - 10.0).abs() < EPS);
        assert!((cam.state().pitch + 4.0).abs() < EPS);
    }
}
