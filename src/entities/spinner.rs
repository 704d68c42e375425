//! Spinner
//!
//! A gate the ball passes through. The collider is a pure sensor; the
//! visible blade spins up on each pass and coasts down with exponential
//! damping. Blade rotation is cosmetic state the renderer reads.

use glam::{Quat, Vec3};
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

use super::{Entity, Transform};
use crate::physics::{BodyOptions, PhysicsWorld, bodies};

pub struct Spinner {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    spin_angle: f32,
    spin_velocity: f32,
}

impl Spinner {
    pub fn new(physics: &mut PhysicsWorld, x: f32, z: f32) -> Self {
        let position = Vec3::new(x, 0.2, z);
        let (body, collider) = bodies::create_cuboid(
            physics,
            Vec3::new(0.25, 0.15, 0.05),
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
            spin_angle: 0.0,
            spin_velocity: 0.0,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    /// Kick the blade into motion.
    pub fn spin(&mut self) {
        self.spin_velocity = 15.0;
    }

    pub fn is_spinning(&self) -> bool {
        self.spin_velocity > 0.1
    }

    /// Advance the blade; call once per rendered frame.
    pub fn update(&mut self, dt: f32) {
        if self.is_spinning() {
            self.spin_angle += self.spin_velocity * dt;
            self.spin_velocity *= 0.95;
            self.transform.rotation = Quat::from_rotation_z(self.spin_angle);
        }
    }
}

impl Entity for Spinner {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn sync_from_body(&mut self, _physics: &PhysicsWorld) {
        // The sensor body is fixed; the blade rotation is owned by `update`.
    }

    fn dispose(&mut self, physics: &mut PhysicsWorld) {
        physics.remove_body(self.body);
    }
}
