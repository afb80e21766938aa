//! ECS resources shared by the host systems.

use bevy_ecs::prelude::Resource;
use stride_input::{DeviceBridge, InputBuffer};
use stride_physics::CharacterBody;
use stride_player::{AnimationSignals, ChaseCamera, LocomotionController};

/// Frame and fixed-step timing.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameTime {
    /// Seconds since the previous frame.
    pub frame_delta: f32,
    /// Fixed simulation step in seconds.
    pub fixed_delta: f32,
    /// Frames started so far, counting the current one.
    pub frame: u64,
    /// Fixed steps run so far.
    pub fixed_steps: u64,
}

/// Host-side input buffer, filled in `PreUpdate` and sampled by the fixed and
/// late stages.
#[derive(Resource, Debug, Default)]
pub struct InputRes(pub InputBuffer);

/// Device translation state (held keys).
#[derive(Resource, Debug, Default)]
pub struct Devices(pub DeviceBridge);

/// The controlled character: its locomotion, body and animation outputs.
#[derive(Resource, Debug)]
pub struct PlayerRig {
    pub controller: LocomotionController,
    pub body: CharacterBody,
    pub signals: AnimationSignals,
}

/// The chase camera following the player.
#[derive(Resource, Debug)]
pub struct CameraRig(pub ChaseCamera);
