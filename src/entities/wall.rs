//! Walls and sensor volumes
//!
//! Fixed cuboids: cabinet walls, lane rails, outlane guides, the playfield
//! slab, and the invisible drain sensor below the bottom opening.

use glam::Vec3;
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

use super::{Entity, Transform};
use crate::physics::{BodyOptions, PhysicsWorld, bodies};

pub struct Wall {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl Wall {
    pub fn new(
        physics: &mut PhysicsWorld,
        position: Vec3,
        half_extents: Vec3,
        rotation_y: f32,
    ) -> Self {
        Self::build(physics, position, half_extents, rotation_y, 0.7, 0.3, false)
    }

    /// An invisible sensor volume (the drain).
    pub fn sensor(physics: &mut PhysicsWorld, position: Vec3, half_extents: Vec3) -> Self {
        Self::build(physics, position, half_extents, 0.0, 0.0, 0.0, true)
    }

    /// The playfield slab, with duller bounce than the cabinet walls.
    pub fn playfield(physics: &mut PhysicsWorld, position: Vec3, half_extents: Vec3) -> Self {
        Self::build(physics, position, half_extents, 0.0, 0.2, 0.4, false)
    }

    fn build(
        physics: &mut PhysicsWorld,
        position: Vec3,
        half_extents: Vec3,
        rotation_y: f32,
        restitution: f32,
        friction: f32,
        sensor: bool,
    ) -> Self {
        let (body, collider) = bodies::create_cuboid(
            physics,
            half_extents,
            &BodyOptions {
                position,
                rotation_y,
                restitution,
                friction,
                sensor,
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
}

impl Entity for Wall {
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
