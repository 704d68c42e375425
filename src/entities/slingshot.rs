//! Slingshots
//!
//! Triangular kickers above the flippers: a sensor box at the centroid for
//! hit detection plus a lively wall collider along each edge. The edge
//! walls do the bouncing; the sensor triggers scoring and the directed
//! kick.

use glam::{Vec2, Vec3};
use rapier3d::prelude::*;

use super::{Entity, Transform};
use crate::physics::{PhysicsWorld, to_na};

pub struct Slingshot {
    transform: Transform,
    body: RigidBodyHandle,
    sensor: ColliderHandle,
}

impl Slingshot {
    /// Build from the three footprint corners in the XZ plane.
    pub fn new(physics: &mut PhysicsWorld, vertices: [Vec2; 3]) -> Self {
        let centroid = (vertices[0] + vertices[1] + vertices[2]) / 3.0;
        let position = Vec3::new(centroid.x, 0.1, centroid.y);

        let body = physics
            .bodies
            .insert(RigidBodyBuilder::fixed().translation(to_na(position)));

        let sensor = ColliderBuilder::cuboid(0.3, 0.15, 0.15)
            .sensor(true)
            .active_events(ActiveEvents::COLLISION_EVENTS);
        let sensor = physics
            .colliders
            .insert_with_parent(sensor, body, &mut physics.bodies);

        for i in 0..3 {
            let a = vertices[i];
            let b = vertices[(i + 1) % 3];
            let mid = (a + b) / 2.0 - centroid;
            let edge = b - a;
            let length = edge.length();
            let angle = edge.x.atan2(edge.y);

            let wall = ColliderBuilder::cuboid(length / 2.0, 0.15, 0.03)
                .translation(vector![mid.x, 0.0, mid.y])
                .rotation(vector![0.0, angle, 0.0])
                .restitution(0.8)
                .friction(0.1);
            physics
                .colliders
                .insert_with_parent(wall, body, &mut physics.bodies);
        }

        Self {
            transform: Transform::from_translation(position),
            body,
            sensor,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.sensor
    }

    /// Centroid, used to aim the kick impulse.
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }
}

impl Entity for Slingshot {
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
    fn test_one_sensor_three_walls() {
        let mut physics = PhysicsWorld::new();
        let sling = Slingshot::new(
            &mut physics,
            [
                Vec2::new(-1.5, 2.5),
                Vec2::new(-1.5, 3.7),
                Vec2::new(-0.8, 3.7),
            ],
        );
        assert_eq!(physics.colliders.len(), 4);
        assert!(physics.colliders[sling.collider_handle()].is_sensor());
    }
}
