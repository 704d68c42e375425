//! Pop bumpers
//!
//! Fixed cylinders in the upper playfield. The bounce the player feels
//! comes from the kick impulse applied when the hit event fires, not from
//! the collider's restitution.

use glam::Vec3;
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

use super::{Entity, Transform};
use crate::consts::{BUMPER_HEIGHT, BUMPER_RADIUS};
use crate::physics::{BodyOptions, PhysicsWorld, bodies};

pub struct Bumper {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl Bumper {
    pub fn new(physics: &mut PhysicsWorld, x: f32, z: f32) -> Self {
        let position = Vec3::new(x, BUMPER_HEIGHT / 2.0, z);
        let (body, collider) = bodies::create_cylinder(
            physics,
            BUMPER_RADIUS,
            BUMPER_HEIGHT / 2.0,
            &BodyOptions {
                position,
                restitution: 0.3,
                friction: 0.1,
                ..Default::default()
            },
        );
        Self {
            transform: Transform::from_translation(position),
            body,
            collider,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    /// Cap center, used to aim the kick impulse away from the bumper.
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }
}

impl Entity for Bumper {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn sync_from_body(&mut self, _physics: &PhysicsWorld) {
        // Static fixture; the pose never changes.
    }

    fn dispose(&mut self, physics: &mut PhysicsWorld) {
        physics.remove_body(self.body);
    }
}
