//! Physics integration: the rigid-body and ground-probe contracts used by the
//! locomotion core, and a Rapier 3D backed implementation of both.
//!
//! [`PhysicsWorld`] owns all simulation state. Colliders carry their layer bits
//! in `user_data` so ground probes can filter by [`LayerMask`].

mod character_body;
mod proxy;


use bevy_ecs::prelude::{ResMut, Resource};
use rapier3d::prelude::*;

pub use character_body::{BodyView, CHARACTER_LAYER, CharacterBody, FOOT_OFFSET};
pub use proxy::{GroundProbe, LayerMask, RigidBodyProxy};

/// Layer assigned to level geometry by default.
pub const GROUND_LAYER: u32 = 0;

/// Central physics simulation resource owning all Rapier state.
#[derive(Resource)]
pub struct PhysicsWorld {
    /// World-space gravity vector.
    pub gravity: Vector,
    /// Timestep and solver configuration.
    pub integration_parameters: IntegrationParameters,
    /// The main simulation pipeline.
    pub physics_pipeline: PhysicsPipeline,
    /// Tracks sleeping/awake body islands.
    pub island_manager: IslandManager,
    /// Broad-phase collision detection (also provides query pipeline).
    pub broad_phase: BroadPhaseBvh,
    /// Narrow-phase collision detection (contact manifolds).
    pub narrow_phase: NarrowPhase,
    /// All rigid bodies in the simulation.
    pub rigid_body_set: RigidBodySet,
    /// All colliders in the simulation.
    pub collider_set: ColliderSet,
    /// Impulse-based joints.
    pub impulse_joint_set: ImpulseJointSet,
    /// Multibody joints.
    pub multibody_joint_set: MultibodyJointSet,
    /// Continuous collision detection solver.
    pub ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Creates a physics world with gravity `(0, -9.81, 0)` stepping at `fixed_dt` seconds.
    pub fn new(fixed_dt: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: fixed_dt,
            ..Default::default()
        };

        Self {
            gravity: Vector::new(0.0, -9.81, 0.0),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Advances the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Returns the current gravity as `(x, y, z)`.
    pub fn gravity(&self) -> (f32, f32, f32) {
        (self.gravity.x, self.gravity.y, self.gravity.z)
    }

    /// Fixed timestep in seconds.
    pub fn fixed_dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Adds a static axis-aligned box on `layer` and returns its collider.
    pub fn add_static_box(
        &mut self,
        center: glam::Vec3,
        half_extents: glam::Vec3,
        layer: u32,
    ) -> ColliderHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(Vector::new(center.x, center.y, center.z))
            .build();
        let body_handle = self.rigid_body_set.insert(body);
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .user_data(u128::from(LayerMask::layer(layer).0))
            .build();
        self.collider_set
            .insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
    }

    /// Removes the rigid body owning `collider`, along with all its colliders.
    pub fn remove_collider_body(&mut self, collider: ColliderHandle) {
        let parent = self.collider_set.get(collider).and_then(|c| c.parent());
        if let Some(parent_handle) = parent {
            self.rigid_body_set.remove(
                parent_handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            );
        }
    }

    /// Downward ray query filtered by layer, optionally ignoring one body.
    pub fn cast_down_excluding(
        &self,
        origin: glam::Vec3,
        max_distance: f32,
        mask: LayerMask,
        exclude: Option<RigidBodyHandle>,
    ) -> bool {
        let on_layer = |_handle: ColliderHandle, collider: &Collider| {
            mask.intersects(collider.user_data as u32)
        };
        let mut filter = QueryFilter::new().predicate(&on_layer);
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body);
        }
        let query_pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.rigid_body_set,
            &self.collider_set,
            filter,
        );

        let ray = Ray::new(
            Vector::new(origin.x, origin.y, origin.z),
            Vector::new(0.0, -1.0, 0.0),
        );
        query_pipeline.cast_ray(&ray, max_distance, true).is_some()
    }
}

impl GroundProbe for PhysicsWorld {
    fn cast_down(&self, origin: glam::Vec3, max_distance: f32, mask: LayerMask) -> bool {
        self.cast_down_excluding(origin, max_distance, mask, None)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(1.0 / 50.0)
    }
}

/// ECS system that steps the physics simulation once per invocation.
///
/// Intended for the fixed-step schedule, after locomotion has written its targets.
pub fn physics_step_system(mut physics: ResMut<PhysicsWorld>) {
    physics.step();
}
