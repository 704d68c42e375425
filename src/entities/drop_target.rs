//! Drop targets
//!
//! A bank of thin standing tabs. A struck target sinks: its body is parked
//! well below the playfield so the collider disengages until the bank
//! resets. The visual transform shows a slightly sunken tab rather than
//! the parked body.

use glam::Vec3;
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

use super::{Entity, Transform, sync_body_pose};
use crate::consts::{DROP_TARGET_DEPTH, DROP_TARGET_HEIGHT, DROP_TARGET_WIDTH};
use crate::physics::{BodyOptions, PhysicsWorld, bodies};

/// Parking depth for a sunken target's body.
const PARKED_Y: f32 = -5.0;

pub struct DropTarget {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    home: Vec3,
    is_down: bool,
}

impl DropTarget {
    pub fn new(physics: &mut PhysicsWorld, x: f32, z: f32) -> Self {
        let home = Vec3::new(x, DROP_TARGET_HEIGHT / 2.0, z);
        let (body, collider) = bodies::create_cuboid(
            physics,
            Vec3::new(
                DROP_TARGET_WIDTH / 2.0,
                DROP_TARGET_HEIGHT / 2.0,
                DROP_TARGET_DEPTH / 2.0,
            ),
            &BodyOptions {
                position: home,
                restitution: 0.3,
                friction: 0.5,
                ..Default::default()
            },
        );
        Self {
            transform: Transform::from_translation(home),
            body,
            collider,
            home,
            is_down: false,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    pub fn is_down(&self) -> bool {
        self.is_down
    }

    /// Sink the target. Repeat hits while down are impossible because the
    /// collider leaves the playfield volume.
    pub fn press(&mut self, physics: &mut PhysicsWorld) {
        if self.is_down {
            return;
        }
        self.is_down = true;
        physics.set_translation(self.body, Vec3::new(self.home.x, PARKED_Y, self.home.z));
        self.transform.translation = Vec3::new(self.home.x, -0.1, self.home.z);
    }

    /// Pop the target back up.
    pub fn reset(&mut self, physics: &mut PhysicsWorld) {
        self.is_down = false;
        physics.set_translation(self.body, self.home);
        self.transform.translation = self.home;
    }
}

impl Entity for DropTarget {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn sync_from_body(&mut self, physics: &PhysicsWorld) {
        if self.is_down {
            // The body is parked below the table; keep the sunken pose.
            return;
        }
        sync_body_pose(&mut self.transform, physics, self.body);
    }

    fn dispose(&mut self, physics: &mut PhysicsWorld) {
        physics.remove_body(self.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_parks_body_and_reset_restores() {
        let mut physics = PhysicsWorld::new();
        let mut target = DropTarget::new(&mut physics, -0.8, -1.0);
        let home = physics.body_translation(target.body);

        target.press(&mut physics);
        assert!(target.is_down());
        assert!(physics.body_translation(target.body).y < -4.0);
        // Pressing again changes nothing.
        target.press(&mut physics);
        assert!(physics.body_translation(target.body).y < -4.0);

        target.reset(&mut physics);
        assert!(!target.is_down());
        assert_eq!(physics.body_translation(target.body), home);
    }
}
