//! Fixed-step locomotion: ground contact, camera-relative movement, facing,
//! jumping, sprinting and animation signals.

use std::fmt;

use glam::{Quat, Vec3};
use stride_config::{ConfigError, LocomotionConfig, LocomotionStrategy};
use stride_input::{InputEvent, InputSnapshot};
use stride_physics::{GroundProbe, LayerMask, RigidBodyProxy};
use tracing::{debug, error, info, trace};

use crate::animation::{ATTACK, AnimationSink, IS_JUMPING, IS_SPRINTING, IS_WALKING};
use crate::basis::{CameraOrientationSource, MovementBasis, look_rotation};

/// Squared movement length below which facing is left alone.
const MIN_TURN_LENGTH_SQ: f32 = 0.01;

/// A collaborator the controller cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    RigidBody,
    Camera,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RigidBody => f.write_str("rigid body"),
            Self::Camera => f.write_str("camera"),
        }
    }
}

/// Activation failures. The controller refuses to exist rather than run degraded.
#[derive(Debug, thiserror::Error)]
pub enum LocomotionError {
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(Collaborator),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Simulation state owned by the controller, refreshed from the body every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterState {
    /// Base (feet) position.
    pub position: Vec3,
    /// Facing.
    pub rotation: Quat,
    pub velocity: Vec3,
    /// Result of this step's ground probe.
    pub grounded: bool,
    /// Set by sprint-start, cleared by sprint-end.
    pub sprinting: bool,
    /// A jump latched while grounded and not yet applied.
    pub pending_jump: bool,
}

/// Converts input and ground contact into rigid-body motion once per fixed step.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: LocomotionConfig,
    state: CharacterState,
}

impl LocomotionController {
    /// Validates the configuration and checks every collaborator is present.
    ///
    /// State starts from the body's current transform, not grounded and not
    /// sprinting.
    pub fn activate<B, C>(
        config: LocomotionConfig,
        body: Option<&B>,
        camera: Option<&C>,
    ) -> Result<Self, LocomotionError>
    where
        B: RigidBodyProxy,
        C: CameraOrientationSource,
    {
        if let Err(e) = config.validate() {
            error!("Locomotion disabled: {e}");
            return Err(e.into());
        }
        let Some(body) = body else {
            error!("Locomotion disabled: no rigid body attached");
            return Err(LocomotionError::MissingCollaborator(Collaborator::RigidBody));
        };
        if camera.is_none() {
            error!("Locomotion disabled: no camera to move relative to");
            return Err(LocomotionError::MissingCollaborator(Collaborator::Camera));
        }

        let state = CharacterState {
            position: body.position(),
            rotation: body.rotation(),
            velocity: body.linear_velocity(),
            grounded: false,
            sprinting: false,
            pending_jump: false,
        };
        info!(
            "Locomotion active ({:?}) at ({:.2}, {:.2}, {:.2})",
            config.strategy, state.position.x, state.position.y, state.position.z
        );
        Ok(Self { config, state })
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Runs one fixed step of duration `dt`.
    ///
    /// Edge events are latched first against the previous step's ground
    /// contact, then the ground is probed afresh and motion is written into
    /// `body`. Writes take effect at the next physics step.
    pub fn step<B, C, A>(
        &mut self,
        input: &InputSnapshot,
        camera: &C,
        body: &mut B,
        animation: &mut A,
        dt: f32,
    ) where
        B: RigidBodyProxy + GroundProbe,
        C: CameraOrientationSource,
        A: AnimationSink,
    {
        self.latch_events(input, animation);

        let base = body.position();
        let origin = base + Vec3::Y * self.config.ground_probe_offset;
        self.state.grounded = body.cast_down(
            origin,
            self.config.ground_probe_distance,
            LayerMask(self.config.ground_layer_mask),
        );

        let direction = MovementBasis::from_camera(camera).direction(input.move_vector());
        let speed = if self.state.sprinting {
            self.config.sprint_speed
        } else {
            self.config.walk_speed
        };

        match self.config.strategy {
            LocomotionStrategy::KinematicPosition => {
                body.set_position(base + direction * speed * dt);
            }
            LocomotionStrategy::VelocitySet => {
                let vertical = body.linear_velocity().y;
                let horizontal = direction * speed;
                body.set_linear_velocity(Vec3::new(horizontal.x, vertical, horizontal.z));
            }
        }

        if direction.length_squared() > MIN_TURN_LENGTH_SQ
            && let Some(target) = look_rotation(direction, Vec3::Y)
        {
            let t = (self.config.rotation_speed * dt).clamp(0.0, 1.0);
            body.set_rotation(body.rotation().slerp(target, t));
        }

        if self.state.pending_jump {
            body.add_impulse(Vec3::Y * self.config.jump_force);
            self.state.pending_jump = false;
            debug!("Jump impulse {:.2} applied", self.config.jump_force);
        }

        animation.set_bool(
            IS_WALKING,
            input.move_vector().length() > self.config.walk_threshold,
        );
        animation.set_bool(IS_JUMPING, !self.state.grounded);
        animation.set_bool(IS_SPRINTING, self.state.sprinting);

        self.state.position = body.position();
        self.state.rotation = body.rotation();
        self.state.velocity = body.linear_velocity();
    }

    fn latch_events<A: AnimationSink>(&mut self, input: &InputSnapshot, animation: &mut A) {
        if input.has(InputEvent::SprintStart) {
            self.state.sprinting = true;
        }
        if input.has(InputEvent::SprintEnd) {
            self.state.sprinting = false;
        }

        if input.has(InputEvent::JumpPressed) {
            if self.state.grounded {
                self.state.pending_jump = true;
                if self.config.jump_cancels_sprint {
                    self.state.sprinting = false;
                }
            } else {
                trace!("Jump press dropped while airborne");
            }
        }

        if input.has(InputEvent::AttackPressed) {
            animation.trigger(ATTACK);
        }
    }
}
