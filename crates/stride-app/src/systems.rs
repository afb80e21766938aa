//! Systems wiring the cores into the frame stages.

use bevy_ecs::prelude::{Res, ResMut};
use stride_input::InputSampler;
use stride_physics::PhysicsWorld;
use tracing::{debug, trace};

use crate::resources::{CameraRig, Devices, FrameTime, InputRes, PlayerRig};
use crate::script::InputScript;

/// `PreUpdate`: replays scripted device actions due this frame.
pub fn scripted_input_system(
    time: Res<FrameTime>,
    script: Option<ResMut<InputScript>>,
    mut devices: ResMut<Devices>,
    mut input: ResMut<InputRes>,
) {
    let Some(mut script) = script else {
        return;
    };
    let applied = script.play_until(time.frame, &mut devices.0, &mut input.0);
    if applied > 0 {
        trace!("Frame {}: {applied} scripted input actions", time.frame);
    }
}

/// `FixedUpdate`: one locomotion step against the character body.
pub fn locomotion_system(
    time: Res<FrameTime>,
    camera: Res<CameraRig>,
    mut input: ResMut<InputRes>,
    mut physics: ResMut<PhysicsWorld>,
    mut rig: ResMut<PlayerRig>,
) {
    let snapshot = input.0.sample_step();
    let PlayerRig {
        controller,
        body,
        signals,
    } = &mut *rig;
    let Some(mut view) = body.view(&mut *physics) else {
        debug!("Character body missing, skipping locomotion step");
        return;
    };
    controller.step(&snapshot, &camera.0, &mut view, signals, time.fixed_delta);
}

/// `LateUpdate`: follows the character's transform as left by this frame's fixed steps.
pub fn chase_camera_system(
    time: Res<FrameTime>,
    physics: Res<PhysicsWorld>,
    rig: Res<PlayerRig>,
    mut input: ResMut<InputRes>,
    mut camera: ResMut<CameraRig>,
) {
    let look = input.0.sample_frame().look_delta();
    let target = rig.body.base_position(&physics);
    camera.0.late_update(target, Some(look), time.frame_delta);
}

/// `LateUpdate`: drains animation triggers fired during the frame.
pub fn animation_trigger_system(mut rig: ResMut<PlayerRig>) {
    for name in rig.signals.drain_triggers() {
        debug!("Animation trigger: {name}");
    }
}
