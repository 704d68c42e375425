//! Decorative props with gameplay colliders
//!
//! Scenery pieces that the ball can still strike: wedge-shaped triangle
//! bumpers flanking the lower playfield, two arches, and a rocket stand.
//! Hits score nothing; they emit their own events and the simulation
//! answers with escape kicks, since the concave geometry around these
//! pieces is where the ball most often wedges itself.

use glam::{Vec2, Vec3};
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

use super::{Entity, Transform};
use crate::physics::{BodyOptions, PhysicsWorld, bodies};

/// Vertical prism over a triangular footprint, as a trimesh.
fn wedge_trimesh(footprint: [Vec2; 3], height: f32) -> (Vec<Vec3>, Vec<[u32; 3]>) {
    let mut vertices = Vec::with_capacity(6);
    for p in footprint {
        vertices.push(Vec3::new(p.x, 0.0, p.y));
    }
    for p in footprint {
        vertices.push(Vec3::new(p.x, height, p.y));
    }

    let mut indices = vec![[0, 1, 2], [3, 5, 4]];
    for i in 0..3u32 {
        let j = (i + 1) % 3;
        indices.push([i, j, i + 3]);
        indices.push([j, j + 3, i + 3]);
    }
    (vertices, indices)
}

/// Semicircular arch profile in the local XY plane, extruded along Z.
fn arch_trimesh(outer: f32, inner: f32, depth: f32, segments: u32) -> (Vec<Vec3>, Vec<[u32; 3]>) {
    let mut vertices = Vec::new();
    let hd = depth / 2.0;

    // Ring cross-sections: outer-front, outer-back, inner-front, inner-back.
    for i in 0..=segments {
        let angle = std::f32::consts::PI * i as f32 / segments as f32;
        let (sin, cos) = angle.sin_cos();
        vertices.push(Vec3::new(outer * cos, outer * sin, hd));
        vertices.push(Vec3::new(outer * cos, outer * sin, -hd));
        vertices.push(Vec3::new(inner * cos, inner * sin, hd));
        vertices.push(Vec3::new(inner * cos, inner * sin, -hd));
    }

    let mut indices = Vec::new();
    let quad = |a: u32, b: u32, c: u32, d: u32| [[a, b, c], [a, c, d]];
    for i in 0..segments {
        let base = i * 4;
        let next = base + 4;
        // Outer band, inner band, front face, back face.
        indices.extend(quad(base, next, next + 1, base + 1));
        indices.extend(quad(base + 2, base + 3, next + 3, next + 2));
        indices.extend(quad(base, base + 2, next + 2, next));
        indices.extend(quad(base + 1, next + 1, next + 3, base + 3));
    }
    // End caps at the feet.
    let last = segments * 4;
    indices.extend(quad(0, 1, 3, 2));
    indices.extend(quad(last, last + 2, last + 3, last + 1));
    (vertices, indices)
}

/// Wedge-shaped deflector flanking the lower playfield.
pub struct TriangleBumper {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl TriangleBumper {
    /// The wedge leans against its side wall, with the long face angled
    /// toward the table center.
    pub fn new(physics: &mut PhysicsWorld, x: f32, z: f32, is_left: bool) -> Self {
        let dir = if is_left { 1.0 } else { -1.0 };
        let footprint = [
            Vec2::new(0.0, -0.6),
            Vec2::new(dir * 0.5, 0.6),
            Vec2::new(0.0, 0.6),
        ];
        let (vertices, indices) = wedge_trimesh(footprint, 0.4);
        let position = Vec3::new(x, 0.0, z);
        let (body, collider) = bodies::create_trimesh(
            physics,
            vertices,
            indices,
            &BodyOptions {
                position,
                restitution: 0.3,
                friction: 0.5,
                ..Default::default()
            },
        );
        Self {
            transform: Transform::from_translation(position),
            body,
            collider,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }
}

impl Entity for TriangleBumper {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn sync_from_body(&mut self, _physics: &PhysicsWorld) {}

    fn dispose(&mut self, physics: &mut PhysicsWorld) {
        physics.remove_body(self.body);
    }
}

/// Arch the ball can pass under, or wedge itself against.
pub struct Arch {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl Arch {
    pub fn new(physics: &mut PhysicsWorld, x: f32, z: f32) -> Self {
        let (vertices, indices) = arch_trimesh(0.5, 0.35, 0.3, 8);
        let position = Vec3::new(x, 0.0, z);
        let (body, collider) = bodies::create_trimesh(
            physics,
            vertices,
            indices,
            &BodyOptions {
                position,
                restitution: 0.8,
                friction: 0.1,
                ..Default::default()
            },
        );
        Self {
            transform: Transform::from_translation(position),
            body,
            collider,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }
}

impl Entity for Arch {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn sync_from_body(&mut self, _physics: &PhysicsWorld) {}

    fn dispose(&mut self, physics: &mut PhysicsWorld) {
        physics.remove_body(self.body);
    }
}

/// Rocket stand in the upper playfield.
pub struct Rocket {
    transform: Transform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl Rocket {
    pub fn new(physics: &mut PhysicsWorld, x: f32, z: f32) -> Self {
        let position = Vec3::new(x, 0.25, z);
        let (body, collider) = bodies::create_cylinder(
            physics,
            0.3,
            0.25,
            &BodyOptions {
                position,
                restitution: 0.8,
                friction: 0.2,
                ..Default::default()
            },
        );
        Self {
            transform: Transform::from_translation(position),
            body,
            collider,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    /// Base center, used to aim the bounce impulse.
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }
}

impl Entity for Rocket {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn sync_from_body(&mut self, _physics: &PhysicsWorld) {}

    fn dispose(&mut self, physics: &mut PhysicsWorld) {
        physics.remove_body(self.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wedge_mesh_is_closed_prism() {
        let (vertices, indices) = wedge_trimesh(
            [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            0.4,
        );
        assert_eq!(vertices.len(), 6);
        // Two caps plus two triangles per side face.
        assert_eq!(indices.len(), 8);
        assert!(indices.iter().flatten().all(|&i| (i as usize) < 6));
    }

    #[test]
    fn test_arch_mesh_indices_in_bounds() {
        let (vertices, indices) = arch_trimesh(0.5, 0.35, 0.3, 8);
        assert_eq!(vertices.len(), 36);
        let max = *indices.iter().flatten().max().unwrap() as usize;
        assert!(max < vertices.len());
    }
}
