//! Body and collider construction helpers
//!
//! Thin builders over rapier descriptors for the shapes the table uses.
//! Every collider is created with collision events enabled so contact
//! onsets reach the dispatch layer.

use glam::Vec3;
use rapier3d::prelude::*;

use super::{PhysicsWorld, to_na};

/// How a body participates in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    #[default]
    Fixed,
    Kinematic,
    Dynamic,
}

/// Shared construction parameters for playfield bodies.
#[derive(Debug, Clone)]
pub struct BodyOptions {
    pub position: Vec3,
    /// Rotation about the Y axis (radians).
    pub rotation_y: f32,
    pub kind: BodyKind,
    pub restitution: f32,
    pub friction: f32,
    /// Overrides the density-derived mass when set.
    pub mass: Option<f32>,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub ccd: bool,
    pub sensor: bool,
}

impl Default for BodyOptions {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_y: 0.0,
            kind: BodyKind::Fixed,
            restitution: 0.3,
            friction: 0.5,
            mass: None,
            linear_damping: 0.0,
            angular_damping: 0.0,
            ccd: false,
            sensor: false,
        }
    }
}

fn build_body(opts: &BodyOptions) -> RigidBodyBuilder {
    let builder = match opts.kind {
        BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based(),
        BodyKind::Fixed => RigidBodyBuilder::fixed(),
    };
    let mut builder = builder
        .translation(to_na(opts.position))
        .linear_damping(opts.linear_damping)
        .angular_damping(opts.angular_damping);
    if opts.rotation_y != 0.0 {
        builder = builder.rotation(vector![0.0, opts.rotation_y, 0.0]);
    }
    if opts.ccd {
        builder = builder.ccd_enabled(true);
    }
    builder
}

fn build_collider(shape: ColliderBuilder, opts: &BodyOptions) -> ColliderBuilder {
    let mut collider = shape
        .restitution(opts.restitution)
        .friction(opts.friction)
        .active_events(ActiveEvents::COLLISION_EVENTS);
    if opts.sensor {
        collider = collider.sensor(true);
    }
    if let Some(mass) = opts.mass {
        collider = collider.mass(mass);
    }
    collider
}

fn insert(
    world: &mut PhysicsWorld,
    shape: ColliderBuilder,
    opts: &BodyOptions,
) -> (RigidBodyHandle, ColliderHandle) {
    let body = world.bodies.insert(build_body(opts));
    let collider = world
        .colliders
        .insert_with_parent(build_collider(shape, opts), body, &mut world.bodies);
    (body, collider)
}

pub fn create_ball(
    world: &mut PhysicsWorld,
    radius: f32,
    opts: &BodyOptions,
) -> (RigidBodyHandle, ColliderHandle) {
    insert(world, ColliderBuilder::ball(radius), opts)
}

pub fn create_cuboid(
    world: &mut PhysicsWorld,
    half_extents: Vec3,
    opts: &BodyOptions,
) -> (RigidBodyHandle, ColliderHandle) {
    insert(
        world,
        ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z),
        opts,
    )
}

pub fn create_cylinder(
    world: &mut PhysicsWorld,
    radius: f32,
    half_height: f32,
    opts: &BodyOptions,
) -> (RigidBodyHandle, ColliderHandle) {
    insert(world, ColliderBuilder::cylinder(half_height, radius), opts)
}

pub fn create_trimesh(
    world: &mut PhysicsWorld,
    vertices: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
    opts: &BodyOptions,
) -> (RigidBodyHandle, ColliderHandle) {
    let points = vertices
        .into_iter()
        .map(|v| point![v.x, v.y, v.z])
        .collect();
    insert(world, ColliderBuilder::trimesh(points, indices), opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_flag_applied() {
        let mut world = PhysicsWorld::new();
        let (_, collider) = create_cuboid(
            &mut world,
            Vec3::splat(0.5),
            &BodyOptions {
                sensor: true,
                ..Default::default()
            },
        );
        assert!(world.colliders[collider].is_sensor());
    }

    #[test]
    fn test_mass_override() {
        let mut world = PhysicsWorld::new();
        let (body, _) = create_ball(
            &mut world,
            0.13,
            &BodyOptions {
                kind: BodyKind::Dynamic,
                mass: Some(0.08),
                ..Default::default()
            },
        );
        let mass = world.bodies[body].mass();
        assert!((mass - 0.08).abs() < 1e-4);
    }

    #[test]
    fn test_trimesh_accepts_wedge() {
        let mut world = PhysicsWorld::new();
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
        ];
        let indices = vec![[0, 1, 2], [3, 5, 4], [0, 3, 1], [1, 3, 4]];
        let (_, collider) = create_trimesh(&mut world, vertices, indices, &BodyOptions::default());
        assert!(world.colliders.get(collider).is_some());
    }
}
