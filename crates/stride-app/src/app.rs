//! World assembly and the per-frame driver.

use bevy_ecs::prelude::*;
use glam::Vec3;
use stride_config::Config;
use stride_physics::{CharacterBody, GROUND_LAYER, PhysicsWorld, physics_step_system};
use stride_player::{AnimationSignals, ChaseCamera, LocomotionController};
use tracing::info;

use crate::error::AppError;
use crate::resources::{CameraRig, Devices, FrameTime, InputRes, PlayerRig};
use crate::schedule::{FrameSchedule, FrameSchedules};
use crate::systems::{
    animation_trigger_system, chase_camera_system, locomotion_system, scripted_input_system,
};

/// Where the character's base starts.
pub const SPAWN_POSITION: Vec3 = Vec3::ZERO;

/// Half extents of the flat test floor. Its top face is at y=0.
const FLOOR_HALF_EXTENTS: Vec3 = Vec3::new(100.0, 0.5, 100.0);

/// Builds a world with a floor, the character, its camera and all resources.
///
/// Configuration is validated and the locomotion controller activated here,
/// so a missing collaborator fails setup instead of a later frame.
pub fn build_world(config: &Config) -> Result<World, AppError> {
    config.validate()?;

    let fixed_delta = config.simulation.fixed_dt() as f32;
    let mut physics = PhysicsWorld::new(fixed_delta);
    physics.add_static_box(
        Vec3::new(0.0, -FLOOR_HALF_EXTENTS.y, 0.0),
        FLOOR_HALF_EXTENTS,
        GROUND_LAYER,
    );
    let mut body = CharacterBody::spawn(&mut physics, SPAWN_POSITION);

    let mut camera = ChaseCamera::new(config.camera.clone(), SPAWN_POSITION)?;
    camera.snap_to(SPAWN_POSITION);

    let controller = {
        let view = body.view(&mut physics);
        LocomotionController::activate(config.locomotion.clone(), view.as_ref(), Some(&camera))?
    };

    let mut world = World::new();
    world.insert_resource(physics);
    world.insert_resource(FrameTime {
        fixed_delta,
        ..Default::default()
    });
    world.insert_resource(InputRes::default());
    world.insert_resource(Devices::default());
    world.insert_resource(PlayerRig {
        controller,
        body,
        signals: AnimationSignals::new(),
    });
    world.insert_resource(CameraRig(camera));

    info!(
        "World ready: fixed step {:.1}ms, strategy {:?}",
        fixed_delta * 1000.0,
        config.locomotion.strategy
    );
    Ok(world)
}

/// Owns the world and its schedules and advances them one frame at a time.
pub struct StrideApp {
    world: World,
    schedules: FrameSchedules,
}

impl StrideApp {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let world = build_world(config)?;

        let mut schedules = FrameSchedules::new(
            config.simulation.fixed_dt(),
            config.simulation.max_steps_per_frame,
        );
        schedules.add_system(FrameSchedule::PreUpdate, scripted_input_system);
        schedules.add_system(
            FrameSchedule::FixedUpdate,
            (locomotion_system, physics_step_system).chain(),
        );
        schedules.add_system(
            FrameSchedule::LateUpdate,
            (chase_camera_system, animation_trigger_system).chain(),
        );

        Ok(Self { world, schedules })
    }

    /// Runs one frame of `frame_dt` seconds and returns the fixed steps taken.
    pub fn update(&mut self, frame_dt: f64) -> u32 {
        {
            let mut time = self.world.resource_mut::<FrameTime>();
            time.frame_delta = frame_dt as f32;
            time.frame += 1;
        }
        let steps = self.schedules.run(&mut self.world, frame_dt);
        self.world.resource_mut::<FrameTime>().fixed_steps += u64::from(steps);
        steps
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::InputScript;
    use stride_config::{CameraConfig, LocomotionStrategy};
    use stride_input::InputEvent;
    use winit::keyboard::KeyCode;

    const FRAME_DT: f64 = 1.0 / 60.0;

    fn app_with_script(config: &Config, script: InputScript) -> StrideApp {
        let mut app = StrideApp::new(config).unwrap();
        app.world_mut().insert_resource(script);
        app
    }

    fn character_position(app: &StrideApp) -> Vec3 {
        app.world().resource::<PlayerRig>().controller.state().position
    }

    fn run_frames(app: &mut StrideApp, frames: usize) {
        for _ in 0..frames {
            app.update(FRAME_DT);
        }
    }

    #[test]
    fn test_build_world_inserts_resources() {
        let world = build_world(&Config::default()).unwrap();
        assert!(world.contains_resource::<PhysicsWorld>());
        assert!(world.contains_resource::<InputRes>());
        assert!(world.contains_resource::<Devices>());
        assert!(world.contains_resource::<PlayerRig>());
        assert!(world.contains_resource::<CameraRig>());
        let time = world.resource::<FrameTime>();
        assert!((time.fixed_delta - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_build_world_rejects_invalid_config() {
        let config = Config {
            camera: CameraConfig {
                follow_smooth_time: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(build_world(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_camera_starts_at_desired_position() {
        let world = build_world(&Config::default()).unwrap();
        let camera = &world.resource::<CameraRig>().0;
        assert!((camera.position() - Vec3::new(0.0, 2.0, -5.0)).length() < 1e-4);
    }

    #[test]
    fn test_frame_counters() {
        let mut app = StrideApp::new(&Config::default()).unwrap();
        let mut total = 0;
        for _ in 0..30 {
            total += app.update(FRAME_DT);
        }
        let time = app.world().resource::<FrameTime>();
        assert_eq!(time.frame, 30);
        assert_eq!(time.fixed_steps, u64::from(total));
        // 0.5 s at 50 Hz, give or take the accumulator remainder.
        assert!((24..=25).contains(&total), "total={total}");
    }

    #[test]
    fn test_idle_character_settles_grounded() {
        let mut app = StrideApp::new(&Config::default()).unwrap();
        run_frames(&mut app, 30);
        let state = *app.world().resource::<PlayerRig>().controller.state();
        assert!(state.grounded);
        assert!(state.position.y.abs() < 0.1);
        assert!(Vec3::new(state.position.x, 0.0, state.position.z).length() < 1e-3);
    }

    #[test]
    fn test_walk_forward_one_second() {
        let script = InputScript::new().hold(KeyCode::KeyW, 11, 71);
        let mut app = app_with_script(&Config::default(), script);
        run_frames(&mut app, 10);
        let start = character_position(&app);
        run_frames(&mut app, 60);
        let travelled = character_position(&app) - start;
        // Walk speed 4 for about one second along the camera's forward (+Z).
        assert!((travelled.z - 4.0).abs() < 0.3, "travelled={travelled}");
        assert!(travelled.x.abs() < 0.05);
    }

    #[test]
    fn test_velocity_strategy_also_walks() {
        let mut config = Config::default();
        config.locomotion.strategy = LocomotionStrategy::VelocitySet;
        let script = InputScript::new().hold(KeyCode::KeyW, 11, 71);
        let mut app = app_with_script(&config, script);
        run_frames(&mut app, 10);
        let start = character_position(&app);
        run_frames(&mut app, 60);
        let travelled = character_position(&app) - start;
        assert!(travelled.z > 3.0, "travelled={travelled}");
    }

    #[test]
    fn test_jump_goes_airborne_and_lands() {
        let script = InputScript::new().tap(KeyCode::Space, 20);
        let mut app = app_with_script(&Config::default(), script);
        run_frames(&mut app, 20);
        assert!(app.world().resource::<PlayerRig>().controller.state().grounded);

        let mut peak = 0.0_f32;
        let mut saw_airborne = false;
        for _ in 0..60 {
            app.update(FRAME_DT);
            let rig = app.world().resource::<PlayerRig>();
            peak = peak.max(rig.controller.state().position.y);
            saw_airborne |= rig.signals.get(stride_player::animation::IS_JUMPING);
        }
        assert!(peak > 0.5, "peak={peak}");
        assert!(saw_airborne);

        run_frames(&mut app, 120);
        let state = *app.world().resource::<PlayerRig>().controller.state();
        assert!(state.grounded);
        assert!(state.position.y.abs() < 0.1);
    }

    #[test]
    fn test_camera_trails_walking_character() {
        let script = InputScript::new().hold(KeyCode::KeyW, 1, 120);
        let mut app = app_with_script(&Config::default(), script);
        run_frames(&mut app, 180);

        let target = character_position(&app);
        let camera = &app.world().resource::<CameraRig>().0;
        let desired = camera.desired_position(target);
        assert!((camera.position() - desired).length() < 0.05);
        assert!(camera.position().z < target.z);
    }

    #[test]
    fn test_mouse_drag_orbits_camera() {
        let script = InputScript::new().drag(1, 11, 20.0, 0.0);
        let mut app = app_with_script(&Config::default(), script);
        run_frames(&mut app, 12);
        let camera = &app.world().resource::<CameraRig>().0;
        // 10 frames of 20 counts at look scale 0.05 and sensitivity 2.
        assert!((camera.state().yaw - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_sprint_edges_reach_controller() {
        let script = InputScript::new().hold(KeyCode::ShiftLeft, 5, 30);
        let mut app = app_with_script(&Config::default(), script);
        run_frames(&mut app, 10);
        assert!(app.world().resource::<PlayerRig>().controller.state().sprinting);
        run_frames(&mut app, 30);
        assert!(!app.world().resource::<PlayerRig>().controller.state().sprinting);
    }

    #[test]
    fn test_attack_trigger_drained_each_frame() {
        let script = InputScript::new().at(
            5,
            crate::script::ScriptAction::MouseButton(
                winit::event::MouseButton::Left,
                winit::event::ElementState::Pressed,
            ),
        );
        let mut app = app_with_script(&Config::default(), script);
        run_frames(&mut app, 10);
        let rig = app.world().resource::<PlayerRig>();
        assert!(rig.signals.pending_triggers().is_empty());
        let pending = app.world().resource::<InputRes>().0.pending_events();
        assert!(!pending.contains(InputEvent::AttackPressed));
    }
}
