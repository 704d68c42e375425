//! Rigid-body world wrapper
//!
//! Owns the rapier3d pipeline state and exposes the narrow interface the
//! simulation needs: body and collider creation, kinematic target poses,
//! velocity access, impulses, fixed-dt stepping, and a per-step drain of
//! collision events.

pub mod bodies;

pub use bodies::{BodyKind, BodyOptions};

use glam::{Quat, Vec3};
use rapier3d::crossbeam::channel::{self, Receiver};
use rapier3d::prelude::*;

use crate::consts::{PHYSICS_TIMESTEP, TABLE_TILT_DEGREES};

/// Gravity for the tilted playfield. The table is laid out in the XZ plane
/// with Y up; the tilt pulls the ball down-table (+Z, toward the drain) and
/// into the playfield surface (-Y).
pub fn table_gravity() -> Vec3 {
    let tilt = TABLE_TILT_DEGREES.to_radians();
    Vec3::new(0.0, -9.81 * tilt.cos(), 9.81 * tilt.sin())
}

pub(crate) fn to_na(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

pub(crate) fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub(crate) fn to_quat(rotation: &Rotation<Real>) -> Quat {
    let c = rotation.coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}

/// The rigid-body world and its event queue.
pub struct PhysicsWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    events: ChannelEventCollector,
    collision_rx: Receiver<CollisionEvent>,
    _contact_forces: Receiver<ContactForceEvent>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        let (collision_tx, collision_rx) = channel::unbounded();
        let (force_tx, force_rx) = channel::unbounded();

        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = PHYSICS_TIMESTEP;

        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            gravity: to_na(table_gravity()),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            events: ChannelEventCollector::new(collision_tx, force_tx),
            collision_rx,
            _contact_forces: force_rx,
        }
    }

    /// Advance the world by exactly one fixed timestep. Collision events
    /// accumulate in the queue until drained with [`poll_collision_event`].
    ///
    /// [`poll_collision_event`]: Self::poll_collision_event
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.events,
        );
    }

    /// Take the next collision notification from the last step, if any.
    pub fn poll_collision_event(&self) -> Option<CollisionEvent> {
        self.collision_rx.try_recv().ok()
    }

    /// Remove a body and its attached colliders.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    pub fn body_translation(&self, handle: RigidBodyHandle) -> Vec3 {
        to_vec3(self.bodies[handle].translation())
    }

    pub fn body_rotation(&self, handle: RigidBodyHandle) -> Quat {
        to_quat(self.bodies[handle].rotation())
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Vec3 {
        to_vec3(self.bodies[handle].linvel())
    }

    pub fn set_linvel(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        self.bodies[handle].set_linvel(to_na(velocity), true);
    }

    pub fn set_angvel(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        self.bodies[handle].set_angvel(to_na(velocity), true);
    }

    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) {
        self.bodies[handle].apply_impulse(to_na(impulse), true);
    }

    /// Teleport a body; used for ball reseats and drop-target parking.
    pub fn set_translation(&mut self, handle: RigidBodyHandle, position: Vec3) {
        self.bodies[handle].set_translation(to_na(position), true);
    }

    /// Target pose for a kinematic body, applied during the next step.
    pub fn set_next_kinematic_translation(&mut self, handle: RigidBodyHandle, position: Vec3) {
        self.bodies[handle].set_next_kinematic_translation(to_na(position));
    }

    /// Target rotation about the Y axis for a kinematic body.
    pub fn set_next_kinematic_rotation_y(&mut self, handle: RigidBodyHandle, angle: f32) {
        let rotation = Rotation::from_axis_angle(&Vector::y_axis(), angle);
        self.bodies[handle].set_next_kinematic_rotation(rotation);
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_gravity_tilt() {
        let g = table_gravity();
        assert_eq!(g.x, 0.0);
        // Most of gravity presses the ball into the playfield.
        assert!(g.y < -9.0);
        // The tilt component pulls down-table, toward the drain at +Z.
        assert!(g.z > 0.0 && g.z < 2.0);
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = PhysicsWorld::new();
        let (body, _) = bodies::create_ball(
            &mut world,
            0.1,
            &BodyOptions {
                position: Vec3::new(0.0, 1.0, 0.0),
                kind: BodyKind::Dynamic,
                ..Default::default()
            },
        );

        for _ in 0..10 {
            world.step();
        }
        assert!(world.body_translation(body).y < 1.0);
        assert!(world.linvel(body).y < 0.0);
    }
}
