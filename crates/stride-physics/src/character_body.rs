//! Rapier-backed character body implementing [`RigidBodyProxy`] and [`GroundProbe`].
//!
//! The character is a dynamic capsule with locked rotations: gravity and
//! collisions move it vertically, while facing is carried on the body proxy
//! since a locked capsule is symmetric around its vertical axis.

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

use crate::proxy::{GroundProbe, LayerMask, RigidBodyProxy};
use crate::PhysicsWorld;

/// Capsule half-height of the cylindrical segment.
const CAPSULE_HALF_HEIGHT: f32 = 0.6;
/// Capsule radius.
const CAPSULE_RADIUS: f32 = 0.3;
/// Character mass. Unit mass makes an impulse equal to a velocity change.
const CHARACTER_MASS: f32 = 1.0;

/// Distance from the capsule center down to the character's base.
pub const FOOT_OFFSET: f32 = CAPSULE_HALF_HEIGHT + CAPSULE_RADIUS;

/// Layer the character's own collider lives on. Keep it out of ground masks.
pub const CHARACTER_LAYER: u32 = 1;

/// Handles to a spawned character capsule plus its facing.
#[derive(Debug, Clone)]
pub struct CharacterBody {
    /// Handle to the dynamic rigid body.
    pub body_handle: RigidBodyHandle,
    /// Handle to the capsule collider attached to the body.
    pub collider_handle: ColliderHandle,
    facing: Quat,
}

impl CharacterBody {
    /// Spawns a capsule whose base sits at `base_position`.
    ///
    /// The capsule is 1.8 units tall with a 0.3 radius.
    pub fn spawn(physics: &mut PhysicsWorld, base_position: Vec3) -> Self {
        let center = base_position + Vec3::Y * FOOT_OFFSET;
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(center.x, center.y, center.z))
            .lock_rotations()
            .build();
        let body_handle = physics.rigid_body_set.insert(body);

        let collider = ColliderBuilder::capsule_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS)
            .friction(0.0)
            .mass(CHARACTER_MASS)
            .user_data(u128::from(LayerMask::layer(CHARACTER_LAYER).0))
            .build();
        let collider_handle =
            physics
                .collider_set
                .insert_with_parent(collider, body_handle, &mut physics.rigid_body_set);

        Self {
            body_handle,
            collider_handle,
            facing: Quat::IDENTITY,
        }
    }

    /// Whether the rigid body still exists in `physics`.
    pub fn is_alive(&self, physics: &PhysicsWorld) -> bool {
        physics.rigid_body_set.get(self.body_handle).is_some()
    }

    /// Base position read straight from the simulation.
    pub fn base_position(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics.rigid_body_set.get(self.body_handle).map(|body| {
            let t = body.translation();
            Vec3::new(t.x, t.y - FOOT_OFFSET, t.z)
        })
    }

    /// Current facing.
    pub fn facing(&self) -> Quat {
        self.facing
    }

    /// Borrows the body together with its physics world as a proxy, or `None`
    /// if the body has been removed from the world.
    pub fn view<'w>(&'w mut self, physics: &'w mut PhysicsWorld) -> Option<BodyView<'w>> {
        if !self.is_alive(physics) {
            return None;
        }
        Some(BodyView {
            body: self,
            physics,
        })
    }
}

/// A character body borrowed together with the world that simulates it.
pub struct BodyView<'w> {
    body: &'w mut CharacterBody,
    physics: &'w mut PhysicsWorld,
}

impl BodyView<'_> {
    fn rigid_body(&self) -> Option<&RigidBody> {
        self.physics.rigid_body_set.get(self.body.body_handle)
    }

    fn rigid_body_mut(&mut self) -> Option<&mut RigidBody> {
        self.physics.rigid_body_set.get_mut(self.body.body_handle)
    }
}

impl RigidBodyProxy for BodyView<'_> {
    fn position(&self) -> Vec3 {
        self.rigid_body().map_or(Vec3::ZERO, |body| {
            let t = body.translation();
            Vec3::new(t.x, t.y - FOOT_OFFSET, t.z)
        })
    }

    fn rotation(&self) -> Quat {
        self.body.facing
    }

    fn linear_velocity(&self) -> Vec3 {
        self.rigid_body().map_or(Vec3::ZERO, |body| {
            let v = body.linvel();
            Vec3::new(v.x, v.y, v.z)
        })
    }

    fn set_position(&mut self, position: Vec3) {
        if let Some(body) = self.rigid_body_mut() {
            body.set_translation(
                Vector::new(position.x, position.y + FOOT_OFFSET, position.z),
                true,
            );
        }
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.body.facing = rotation.normalize();
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        if let Some(body) = self.rigid_body_mut() {
            body.set_linvel(Vector::new(velocity.x, velocity.y, velocity.z), true);
        }
    }

    fn add_impulse(&mut self, impulse: Vec3) {
        if let Some(body) = self.rigid_body_mut() {
            body.apply_impulse(Vector::new(impulse.x, impulse.y, impulse.z), true);
        }
    }
}

impl GroundProbe for BodyView<'_> {
    fn cast_down(&self, origin: Vec3, max_distance: f32, mask: LayerMask) -> bool {
        self.physics
            .cast_down_excluding(origin, max_distance, mask, Some(self.body.body_handle))
    }
}
