//! Rollover lanes
//!
//! Floor sensors across the top lanes. Each lane latches a lamp when the
//! ball rolls over it; completing the bank darkens all lamps again. The
//! lamp flag is cosmetic state the renderer and HUD read.

use glam::Vec3;
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

use super::{Entity, Transform};
use crate::physics::{BodyOptions, PhysicsWorld, bodies};

pub struct RolloverLane {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    is_lit: bool,
}

impl RolloverLane {
    pub fn new(physics: &mut PhysicsWorld, x: f32, z: f32) -> Self {
        let position = Vec3::new(x, 0.1, z);
        let (body, collider) = bodies::create_cuboid(
            physics,
            Vec3::new(0.1, 0.1, 0.2),
            &BodyOptions {
                position,
                sensor: true,
                ..Default::default()
            },
        );
        Self {
            transform: Transform::from_translation(position),
            body,
            collider,
            is_lit: false,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    pub fn is_lit(&self) -> bool {
        self.is_lit
    }

    pub fn light(&mut self) {
        self.is_lit = true;
    }

    pub fn darken(&mut self) {
        self.is_lit = false;
    }
}

impl Entity for RolloverLane {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn sync_from_body(&mut self, _physics: &PhysicsWorld) {
        // Static sensor; the pose never changes.
    }

    fn dispose(&mut self, physics: &mut PhysicsWorld) {
        physics.remove_body(self.body);
    }
}
