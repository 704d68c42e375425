//! The pinball
//!
//! The only dynamic body on the table. CCD is enabled so a full-power
//! launch cannot tunnel through walls or the flipper faces.

use glam::Vec3;
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

use super::{Entity, Transform, sync_body_pose};
use crate::consts::{
    BALL_ANGULAR_DAMPING, BALL_FRICTION, BALL_LINEAR_DAMPING, BALL_MASS, BALL_RADIUS,
    BALL_RESTITUTION,
};
use crate::physics::{BodyKind, BodyOptions, PhysicsWorld, bodies};

pub struct Ball {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl Ball {
    pub fn new(physics: &mut PhysicsWorld, position: Vec3) -> Self {
        let (body, collider) = bodies::create_ball(
            physics,
            BALL_RADIUS,
            &BodyOptions {
                position,
                kind: BodyKind::Dynamic,
                restitution: BALL_RESTITUTION,
                friction: BALL_FRICTION,
                mass: Some(BALL_MASS),
                linear_damping: BALL_LINEAR_DAMPING,
                angular_damping: BALL_ANGULAR_DAMPING,
                ccd: true,
                ..Default::default()
            },
        );
        Self {
            transform: Transform::from_translation(position),
            body,
            collider,
        }
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    /// Teleport the ball and cancel all motion.
    pub fn reset(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        physics.set_translation(self.body, position);
        physics.set_linvel(self.body, Vec3::ZERO);
        physics.set_angvel(self.body, Vec3::ZERO);
        self.transform.translation = position;
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Vec3 {
        physics.body_translation(self.body)
    }

    pub fn velocity(&self, physics: &PhysicsWorld) -> Vec3 {
        physics.linvel(self.body)
    }

    pub fn set_velocity(&self, physics: &mut PhysicsWorld, velocity: Vec3) {
        physics.set_linvel(self.body, velocity);
    }

    pub fn apply_impulse(&self, physics: &mut PhysicsWorld, impulse: Vec3) {
        physics.apply_impulse(self.body, impulse);
    }

    pub fn speed(&self, physics: &PhysicsWorld) -> f32 {
        self.velocity(physics).length()
    }
}

impl Entity for Ball {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn sync_from_body(&mut self, physics: &PhysicsWorld) {
        sync_body_pose(&mut self.transform, physics, self.body);
    }

    fn dispose(&mut self, physics: &mut PhysicsWorld) {
        physics.remove_body(self.body);
    }
}
