//! Table assembly
//!
//! Instantiates every entity from the layout against the physics world and
//! registers each collider with the collision dispatcher under its
//! semantic tag. Every scoring collider is registered here, before the
//! first physics step ever runs.

use glam::Vec3;

use super::layout::TableLayout;
use crate::entities::{
    Arch, Ball, Bumper, DropTarget, Entity, Flipper, Plunger, Ramp, Rocket, RolloverLane,
    Slingshot, Spinner, TriangleBumper, Wall,
};
use crate::physics::PhysicsWorld;
use crate::sim::collision::{ColliderTag, CollisionHandler};

/// Every entity on the table, owned for the whole session.
pub struct Table {
    pub ball: Ball,
    pub left_flipper: Flipper,
    pub right_flipper: Flipper,
    pub plunger: Plunger,
    pub bumpers: Vec<Bumper>,
    pub slingshots: Vec<Slingshot>,
    pub drop_targets: Vec<DropTarget>,
    pub spinner: Spinner,
    pub rollover_lanes: Vec<RolloverLane>,
    pub ramp: Ramp,
    pub walls: Vec<Wall>,
    pub playfield: Wall,
    pub drain: Wall,
    pub triangle_bumpers: Vec<TriangleBumper>,
    pub arches: Vec<Arch>,
    pub rocket: Rocket,
}

impl Table {
    /// Copy body poses into every visual transform and advance cosmetic
    /// state; call once per rendered frame.
    pub fn sync_transforms(&mut self, physics: &PhysicsWorld, dt: f32) {
        for entity in self.entities_mut() {
            entity.sync_from_body(physics);
        }
        self.spinner.update(dt);
    }

    /// Remove every entity from the scene and world. Only exercised on
    /// table teardown; entities persist for the session during play.
    pub fn dispose(&mut self, physics: &mut PhysicsWorld) {
        for entity in self.entities_mut() {
            entity.dispose(physics);
        }
    }

    fn entities_mut(&mut self) -> Vec<&mut dyn Entity> {
        let mut entities: Vec<&mut dyn Entity> = vec![
            &mut self.ball,
            &mut self.left_flipper,
            &mut self.right_flipper,
            &mut self.plunger,
            &mut self.spinner,
            &mut self.ramp,
            &mut self.playfield,
            &mut self.drain,
            &mut self.rocket,
        ];
        entities.extend(self.bumpers.iter_mut().map(|e| e as &mut dyn Entity));
        entities.extend(self.slingshots.iter_mut().map(|e| e as &mut dyn Entity));
        entities.extend(self.drop_targets.iter_mut().map(|e| e as &mut dyn Entity));
        entities.extend(self.rollover_lanes.iter_mut().map(|e| e as &mut dyn Entity));
        entities.extend(self.walls.iter_mut().map(|e| e as &mut dyn Entity));
        entities.extend(
            self.triangle_bumpers
                .iter_mut()
                .map(|e| e as &mut dyn Entity),
        );
        entities.extend(self.arches.iter_mut().map(|e| e as &mut dyn Entity));
        entities
    }
}

/// Build the whole table and register every collider.
pub fn build_table(
    physics: &mut PhysicsWorld,
    layout: &TableLayout,
    collisions: &mut CollisionHandler,
) -> Table {
    let playfield = Wall::playfield(
        physics,
        layout.playfield.position,
        layout.playfield.half_extents,
    );

    let mut walls = Vec::with_capacity(layout.walls.len());
    for spec in &layout.walls {
        let wall = Wall::new(physics, spec.position, spec.half_extents, spec.rotation_y);
        collisions.register_collider(wall.collider_handle(), ColliderTag::Wall, 0);
        walls.push(wall);
    }

    let drain = Wall::sensor(physics, layout.drain.position, layout.drain.half_extents);
    collisions.register_collider(drain.collider_handle(), ColliderTag::Drain, 0);

    let ball = Ball::new(physics, layout.ball_start);
    collisions.register_ball(ball.collider_handle());

    let left_flipper = Flipper::new(physics, layout.flipper_left, true);
    collisions.register_collider(left_flipper.collider_handle(), ColliderTag::Flipper, 0);
    let right_flipper = Flipper::new(physics, layout.flipper_right, false);
    collisions.register_collider(right_flipper.collider_handle(), ColliderTag::Flipper, 1);

    let plunger = Plunger::new(physics, layout.plunger.x, layout.plunger.y);
    collisions.register_collider(plunger.collider_handle(), ColliderTag::Plunger, 0);

    let mut bumpers = Vec::with_capacity(layout.bumpers.len());
    for (i, spec) in layout.bumpers.iter().enumerate() {
        let bumper = Bumper::new(physics, spec.x, spec.y);
        collisions.register_collider(bumper.collider_handle(), ColliderTag::Bumper, i);
        bumpers.push(bumper);
    }

    let mut slingshots = Vec::with_capacity(2);
    for (i, vertices) in [layout.slingshot_left, layout.slingshot_right]
        .into_iter()
        .enumerate()
    {
        let slingshot = Slingshot::new(physics, vertices);
        collisions.register_collider(slingshot.collider_handle(), ColliderTag::Slingshot, i);
        slingshots.push(slingshot);
    }

    let mut drop_targets = Vec::with_capacity(layout.drop_targets.len());
    for (i, spec) in layout.drop_targets.iter().enumerate() {
        let target = DropTarget::new(physics, spec.x, spec.y);
        collisions.register_collider(target.collider_handle(), ColliderTag::DropTarget, i);
        drop_targets.push(target);
    }

    let spinner = Spinner::new(physics, layout.spinner.x, layout.spinner.y);
    collisions.register_collider(spinner.collider_handle(), ColliderTag::Spinner, 0);

    let mut rollover_lanes = Vec::with_capacity(layout.rollover_lanes.len());
    for (i, spec) in layout.rollover_lanes.iter().enumerate() {
        let lane = RolloverLane::new(physics, spec.x, spec.y);
        collisions.register_collider(lane.collider_handle(), ColliderTag::RolloverLane, i);
        rollover_lanes.push(lane);
    }

    let ramp = Ramp::new(
        physics,
        Vec3::new(layout.ramp.start.x, 0.0, layout.ramp.start.y),
        Vec3::new(layout.ramp.end.x, 0.0, layout.ramp.end.y),
        layout.ramp.height,
    );
    collisions.register_collider(ramp.collider_handle(), ColliderTag::Ramp, 0);

    let mut triangle_bumpers = Vec::with_capacity(layout.triangle_bumpers.len());
    for (i, spec) in layout.triangle_bumpers.iter().enumerate() {
        let wedge = TriangleBumper::new(physics, spec.position.x, spec.position.y, spec.is_left);
        collisions.register_collider(wedge.collider_handle(), ColliderTag::TriangleBumper, i);
        triangle_bumpers.push(wedge);
    }

    let mut arches = Vec::with_capacity(layout.arches.len());
    for (i, spec) in layout.arches.iter().enumerate() {
        let arch = Arch::new(physics, spec.x, spec.y);
        collisions.register_collider(arch.collider_handle(), ColliderTag::Arch, i);
        arches.push(arch);
    }

    let rocket = Rocket::new(physics, layout.rocket.x, layout.rocket.y);
    collisions.register_collider(rocket.collider_handle(), ColliderTag::Rocket, 0);

    log::debug!("table assembled: {} colliders registered", collisions.len());

    Table {
        ball,
        left_flipper,
        right_flipper,
        plunger,
        bumpers,
        slingshots,
        drop_targets,
        spinner,
        rollover_lanes,
        ramp,
        walls,
        playfield,
        drain,
        triangle_bumpers,
        arches,
        rocket,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> (PhysicsWorld, CollisionHandler, Table) {
        let mut physics = PhysicsWorld::new();
        let mut collisions = CollisionHandler::new();
        let table = build_table(&mut physics, &TableLayout::standard(), &mut collisions);
        (physics, collisions, table)
    }

    #[test]
    fn test_every_scoring_collider_is_registered() {
        let layout = TableLayout::standard();
        let (_physics, collisions, _table) = build();

        // Walls + drain + ball + flippers + plunger + every fixture.
        let expected = layout.walls.len()
            + 1
            + 1
            + 2
            + 1
            + layout.bumpers.len()
            + 2
            + layout.drop_targets.len()
            + 1
            + layout.rollover_lanes.len()
            + 1
            + layout.triangle_bumpers.len()
            + layout.arches.len()
            + 1;
        assert_eq!(collisions.len(), expected);
    }

    #[test]
    fn test_exactly_one_ball_registered() {
        let (_physics, collisions, table) = build();
        assert_eq!(
            collisions.ball_handle(),
            Some(table.ball.collider_handle())
        );
    }

    #[test]
    fn test_sync_and_teardown() {
        let (mut physics, mut collisions, mut table) = build();

        for _ in 0..5 {
            physics.step();
        }
        table.sync_transforms(&physics, 1.0 / 60.0);

        table.dispose(&mut physics);
        collisions.clear();
        assert_eq!(physics.bodies.len(), 0);
        assert!(collisions.is_empty());
    }
}
