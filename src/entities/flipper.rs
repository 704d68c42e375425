//! Flippers
//!
//! Kinematic paddles pivoting about the Y axis. The player holds a flipper
//! up; the angle chases the target at a fixed angular speed and never
//! overshoots, so the collider sweep stays consistent between steps.

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

use super::{Entity, Transform};
use crate::consts::{
    FLIPPER_HEIGHT, FLIPPER_LENGTH, FLIPPER_MAX_ANGLE, FLIPPER_REST_ANGLE, FLIPPER_SPEED,
    FLIPPER_WIDTH,
};
use crate::physics::{PhysicsWorld, to_na};

pub struct Flipper {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    is_left: bool,
    current_angle: f32,
    target_angle: f32,
}

impl Flipper {
    pub fn new(physics: &mut PhysicsWorld, pivot: Vec3, is_left: bool) -> Self {
        let body = physics
            .bodies
            .insert(RigidBodyBuilder::kinematic_position_based().translation(to_na(pivot)));

        // The collider is offset so the pivot sits at the thick end: the
        // left flipper extends in +X, the right in -X. The left face is
        // slightly deader so catches on the left flipper are controllable.
        let dir = if is_left { 1.0 } else { -1.0 };
        let hx = FLIPPER_LENGTH / 2.0;
        let collider = ColliderBuilder::cuboid(hx, FLIPPER_HEIGHT / 2.0, FLIPPER_WIDTH / 2.0)
            .translation(vector![dir * hx, 0.0, 0.0])
            .restitution(if is_left { 0.08 } else { 0.2 })
            .friction(0.5)
            .active_events(ActiveEvents::COLLISION_EVENTS);
        let collider = physics
            .colliders
            .insert_with_parent(collider, body, &mut physics.bodies);

        let rest = if is_left {
            FLIPPER_REST_ANGLE
        } else {
            -FLIPPER_REST_ANGLE
        };
        let mut flipper = Self {
            transform: Transform::from_translation(pivot),
            body,
            collider,
            is_left,
            current_angle: rest,
            target_angle: rest,
        };
        flipper.apply_rotation(physics);
        flipper
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    pub fn angle(&self) -> f32 {
        self.current_angle
    }

    /// Press or release the flipper button.
    pub fn set_active(&mut self, active: bool) {
        let angle = if active {
            FLIPPER_MAX_ANGLE
        } else {
            FLIPPER_REST_ANGLE
        };
        self.target_angle = if self.is_left { angle } else { -angle };
    }

    /// Advance the swing by one fixed timestep.
    pub fn update(&mut self, dt: f32, physics: &mut PhysicsWorld) {
        self.current_angle = step_toward(self.current_angle, self.target_angle, FLIPPER_SPEED * dt);
        self.apply_rotation(physics);
    }

    fn apply_rotation(&mut self, physics: &mut PhysicsWorld) {
        physics.set_next_kinematic_rotation_y(self.body, self.current_angle);
        self.transform.rotation = Quat::from_rotation_y(self.current_angle);
    }
}

/// Move `current` toward `target` by at most `max_delta`, without overshoot.
fn step_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

impl Entity for Flipper {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn sync_from_body(&mut self, _physics: &PhysicsWorld) {
        // Kinematic: the pivot never moves and the rotation is already
        // mirrored into the transform by `apply_rotation`.
    }

    fn dispose(&mut self, physics: &mut PhysicsWorld) {
        physics.remove_body(self.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PHYSICS_TIMESTEP;

    #[test]
    fn test_step_toward_no_overshoot() {
        let mut angle = -0.45_f32;
        let per_step = FLIPPER_SPEED * PHYSICS_TIMESTEP;
        let mut steps = 0;
        while angle != 0.45 {
            angle = step_toward(angle, 0.45, per_step);
            assert!(angle <= 0.45);
            steps += 1;
            assert!(steps < 100, "swing never converged");
        }
        // Full swing of 0.9 rad at 25 rad/s over 1/120 s steps.
        assert_eq!(steps, (0.9 / per_step).ceil() as u32);
    }

    #[test]
    fn test_mirrored_targets() {
        let mut physics = PhysicsWorld::new();
        let mut left = Flipper::new(&mut physics, Vec3::new(-0.6, 0.1, 4.0), true);
        let mut right = Flipper::new(&mut physics, Vec3::new(0.6, 0.1, 4.0), false);
        assert_eq!(left.angle(), -right.angle());

        left.set_active(true);
        right.set_active(true);
        for _ in 0..30 {
            left.update(PHYSICS_TIMESTEP, &mut physics);
            right.update(PHYSICS_TIMESTEP, &mut physics);
        }
        assert_eq!(left.angle(), FLIPPER_MAX_ANGLE);
        assert_eq!(right.angle(), -FLIPPER_MAX_ANGLE);
    }
}
