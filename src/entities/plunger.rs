//! Plunger
//!
//! A kinematic block at the foot of the launch lane. Holding the plunger
//! action accumulates charge, mirrored into a pull-back translation along
//! the launch axis; releasing reports the launch speed through an explicit
//! event rather than a captured callback.

use glam::Vec3;
use rapier3d::prelude::*;

use super::{Entity, Transform};
use crate::consts::{
    PLUNGER_CHARGE_SPEED, PLUNGER_HEIGHT, PLUNGER_LAUNCH_SPEED, PLUNGER_MAX_PULL, PLUNGER_WIDTH,
};
use crate::physics::{PhysicsWorld, to_na};

pub struct Plunger {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    x: f32,
    rest_z: f32,
    charge: f32,
    charging: bool,
}

impl Plunger {
    pub fn new(physics: &mut PhysicsWorld, x: f32, z: f32) -> Self {
        let position = Vec3::new(x, 0.0, z);
        let body = physics
            .bodies
            .insert(RigidBodyBuilder::kinematic_position_based().translation(to_na(position)));
        let collider = ColliderBuilder::cuboid(
            PLUNGER_WIDTH / 2.0,
            PLUNGER_HEIGHT / 2.0,
            PLUNGER_WIDTH / 2.0,
        )
        .restitution(0.8)
        .friction(0.3)
        .active_events(ActiveEvents::COLLISION_EVENTS);
        let collider = physics
            .colliders
            .insert_with_parent(collider, body, &mut physics.bodies);

        Self {
            transform: Transform::from_translation(position),
            body,
            collider,
            x,
            rest_z: z,
            charge: 0.0,
            charging: false,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Begin a pull stroke from zero charge.
    pub fn start_charge(&mut self) {
        self.charging = true;
        self.charge = 0.0;
    }

    /// Finish the stroke and return the launch speed. Releasing a plunger
    /// that was never charging is a no-op and returns `None`; input timing
    /// can legitimately race game-state transitions.
    pub fn release(&mut self) -> Option<f32> {
        if !self.charging {
            return None;
        }
        self.charging = false;
        let power = self.charge / PLUNGER_MAX_PULL;
        self.charge = 0.0;
        Some(power * PLUNGER_LAUNCH_SPEED)
    }

    /// Charge fraction in 0..=1, for the HUD power meter.
    pub fn charge_fraction(&self) -> f32 {
        self.charge / PLUNGER_MAX_PULL
    }

    /// Advance the stroke by one fixed timestep.
    pub fn update(&mut self, dt: f32, physics: &mut PhysicsWorld) {
        if self.charging {
            self.charge = (self.charge + PLUNGER_CHARGE_SPEED * dt).min(PLUNGER_MAX_PULL);
        }

        // Pull-back is +Z, away from the playfield.
        let pull = if self.charging { self.charge } else { 0.0 };
        let target = Vec3::new(self.x, 0.0, self.rest_z + pull);
        physics.set_next_kinematic_translation(self.body, target);
        self.transform.translation = target;
    }
}

impl Entity for Plunger {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn sync_from_body(&mut self, _physics: &PhysicsWorld) {
        // Kinematic: `update` already mirrors the stroke into the transform.
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
    fn test_release_without_charge_is_noop() {
        let mut physics = PhysicsWorld::new();
        let mut plunger = Plunger::new(&mut physics, 2.15, 4.7);
        assert_eq!(plunger.release(), None);
    }

    #[test]
    fn test_charge_clamps_at_max_pull() {
        let mut physics = PhysicsWorld::new();
        let mut plunger = Plunger::new(&mut physics, 2.15, 4.7);
        plunger.start_charge();
        // Two seconds of charging would pull 5 m unclamped.
        for _ in 0..240 {
            plunger.update(PHYSICS_TIMESTEP, &mut physics);
        }
        assert_eq!(plunger.charge_fraction(), 1.0);
        assert_eq!(plunger.transform().translation.z, 4.7 + PLUNGER_MAX_PULL);

        let speed = plunger.release().unwrap();
        assert!((speed - PLUNGER_LAUNCH_SPEED).abs() < 1e-4);
        assert_eq!(plunger.release(), None);
    }

    #[test]
    fn test_partial_charge_scales_speed() {
        let mut physics = PhysicsWorld::new();
        let mut plunger = Plunger::new(&mut physics, 2.15, 4.7);
        plunger.start_charge();
        // 0.1 s of charge at 2.5 m/s is 0.25 m of pull.
        for _ in 0..12 {
            plunger.update(PHYSICS_TIMESTEP, &mut physics);
        }
        let speed = plunger.release().unwrap();
        let expected = (0.25 / PLUNGER_MAX_PULL) * PLUNGER_LAUNCH_SPEED;
        assert!((speed - expected).abs() < 0.1);
    }
}
