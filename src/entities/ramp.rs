//! Ramp
//!
//! An inclined lane with side rails and a completion sensor at the top.
//! The surface collider is tilted to match the climb so the ball actually
//! rolls up it; only the sensor at the crest scores.

use glam::Vec3;
use rapier3d::prelude::*;

use super::{Entity, Transform};
use crate::physics::{PhysicsWorld, to_na};

pub struct Ramp {
    transform: Transform,
    body: RigidBodyHandle,
    sensor: ColliderHandle,
}

impl Ramp {
    pub fn new(physics: &mut PhysicsWorld, start: Vec3, end: Vec3, height: f32) -> Self {
        let dx = end.x - start.x;
        let dz = end.z - start.z;
        let length = (dx * dx + dz * dz).sqrt();
        let yaw = dx.atan2(dz);
        let climb = (height / length).atan();

        let mid = Vec3::new((start.x + end.x) / 2.0, height / 2.0, (start.z + end.z) / 2.0);
        let body = physics.bodies.insert(
            RigidBodyBuilder::fixed()
                .translation(to_na(mid))
                .rotation(vector![0.0, yaw, 0.0]),
        );

        // Inclined surface. Local -Z runs toward the crest, so the tilt is
        // a negative pitch about local X.
        let surface = ColliderBuilder::cuboid(0.25, 0.015, length / 2.0)
            .rotation(vector![-climb, 0.0, 0.0])
            .restitution(0.2)
            .friction(0.3);
        physics
            .colliders
            .insert_with_parent(surface, body, &mut physics.bodies);

        // Completion sensor at the crest.
        let sensor = ColliderBuilder::cuboid(0.25, 0.1, 0.15)
            .translation(vector![0.0, 0.1, -length / 2.0 + 0.15])
            .sensor(true)
            .active_events(ActiveEvents::COLLISION_EVENTS);
        let sensor = physics
            .colliders
            .insert_with_parent(sensor, body, &mut physics.bodies);

        // Side rails keep the ball on the lane.
        for side in [-1.0, 1.0] {
            let rail = ColliderBuilder::cuboid(0.015, 0.1, length / 2.0)
                .translation(vector![side * 0.25, 0.05, 0.0])
                .restitution(0.3);
            physics
                .colliders
                .insert_with_parent(rail, body, &mut physics.bodies);
        }

        Self {
            transform: Transform::from_translation(mid),
            body,
            sensor,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.sensor
    }
}

impl Entity for Ramp {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_sensor_and_rails() {
        let mut physics = PhysicsWorld::new();
        let ramp = Ramp::new(
            &mut physics,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, -3.5),
            0.4,
        );
        assert_eq!(physics.colliders.len(), 4);
        assert!(physics.colliders[ramp.collider_handle()].is_sensor());
    }
}
