//! Playfield entities
//!
//! Each entity owns a renderer-facing [`Transform`] and at most one physics
//! body. The body is the authority for pose: `sync_from_body` copies it into
//! the transform once per rendered frame. Entities live for the whole
//! session and are only disposed on table teardown.

mod ball;
mod bumper;
mod drop_target;
mod flipper;
mod plunger;
mod props;
mod ramp;
mod rollover_lane;
mod slingshot;
mod spinner;
mod wall;

pub use ball::Ball;
pub use bumper::Bumper;
pub use drop_target::DropTarget;
pub use flipper::Flipper;
pub use plunger::Plunger;
pub use props::{Arch, Rocket, TriangleBumper};
pub use ramp::Ramp;
pub use rollover_lane::RolloverLane;
pub use slingshot::Slingshot;
pub use spinner::Spinner;
pub use wall::Wall;

use glam::{Quat, Vec3};
use rapier3d::prelude::RigidBodyHandle;

use crate::physics::PhysicsWorld;

/// Pose exposed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}

/// Capability shared by every playfield entity.
pub trait Entity {
    /// Renderer-facing pose, refreshed by [`sync_from_body`].
    ///
    /// [`sync_from_body`]: Entity::sync_from_body
    fn transform(&self) -> &Transform;

    /// Copy the physics body pose into the visual transform.
    fn sync_from_body(&mut self, physics: &PhysicsWorld);

    /// Remove the entity's body and colliders from the world. The entity
    /// and any collider handles taken from it must not be used afterwards.
    fn dispose(&mut self, physics: &mut PhysicsWorld);
}

/// Standard pose sync for entities backed by a single body.
pub(crate) fn sync_body_pose(
    transform: &mut Transform,
    physics: &PhysicsWorld,
    body: RigidBodyHandle,
) {
    transform.translation = physics.body_translation(body);
    transform.rotation = physics.body_rotation(body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispose_removes_body() {
        let mut physics = PhysicsWorld::new();
        let mut ball = Ball::new(&mut physics, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(physics.bodies.len(), 1);
        assert_eq!(physics.colliders.len(), 1);

        ball.dispose(&mut physics);
        assert_eq!(physics.bodies.len(), 0);
        assert_eq!(physics.colliders.len(), 0);
    }

    #[test]
    fn test_sync_copies_body_pose() {
        let mut physics = PhysicsWorld::new();
        let mut ball = Ball::new(&mut physics, Vec3::new(0.0, 1.0, 0.0));
        for _ in 0..30 {
            physics.step();
        }
        ball.sync_from_body(&physics);
        let pose = ball.transform();
        assert!(pose.translation.y < 1.0);
    }
}
