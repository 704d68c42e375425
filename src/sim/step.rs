//! Fixed-timestep simulation
//!
//! Owns the physics world, the table, the collision dispatcher, and the
//! game state, and wires them together: each `step` advances kinematic
//! entities, runs due deferred actions, steps the rigid-body world once,
//! dispatches collision events, applies the physical reactions, and runs
//! the ball safety checks. Everything here is mutated from this single
//! call; rendering only ever reads.

use glam::{Vec2, Vec3};

use super::collision::{CollisionHandler, CollisionOutcome};
use super::events::{GameEvent, GameEventBus};
use super::state::GameState;
use crate::consts::{
    ARCH_IMPULSE, BUMPER_IMPULSE, DROP_TARGET_RESET_TICKS, FALL_THROUGH_Y, MAX_BALL_SPEED,
    PHYSICS_TIMESTEP, RESPAWN_DELAY_TICKS, ROCKET_BOUNCE, SLINGSHOT_IMPULSE,
    TRIANGLE_BUMPER_BOUNCE,
};
use crate::highscore::HighScoreStore;
use crate::input::InputAction;
use crate::physics::PhysicsWorld;
use crate::table::{Table, TableLayout, build_table};

/// An action scheduled to run after a tick countdown. Tick counting keeps
/// the simulation deterministic; no wall-clock timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    RespawnBall,
    ResetDropTargets,
}

#[derive(Debug, Clone, Copy)]
struct Deferred {
    ticks_left: u32,
    action: DeferredAction,
}

/// The assembled game: physics, table, dispatch, state, and event bus.
pub struct Simulation {
    pub physics: PhysicsWorld,
    pub table: Table,
    pub collisions: CollisionHandler,
    pub state: GameState,
    pub events: GameEventBus,
    layout: TableLayout,
    deferred: Vec<Deferred>,
}

impl Simulation {
    pub fn new(store: HighScoreStore) -> Self {
        let layout = TableLayout::standard();
        let mut physics = PhysicsWorld::new();
        let mut collisions = CollisionHandler::new();
        let table = build_table(&mut physics, &layout, &mut collisions);

        Self {
            physics,
            table,
            collisions,
            state: GameState::new(store),
            events: GameEventBus::new(),
            layout,
            deferred: Vec::new(),
        }
    }

    /// Begin a fresh game: reset state, reseat the ball, restore the
    /// drop-target bank, darken the lane lamps.
    pub fn start_game(&mut self) {
        self.deferred.clear();
        self.state.start_game(&mut self.events);
        self.table.ball.reset(&mut self.physics, self.layout.ball_start);
        for target in &mut self.table.drop_targets {
            target.reset(&mut self.physics);
        }
        for lane in &mut self.table.rollover_lanes {
            lane.darken();
        }
        log::info!("game started");
    }

    /// Route an abstract input edge into the simulation.
    pub fn handle_input(&mut self, action: InputAction, pressed: bool) {
        match action {
            InputAction::LeftFlipper => self.table.left_flipper.set_active(pressed),
            InputAction::RightFlipper => self.table.right_flipper.set_active(pressed),
            InputAction::Plunger => {
                if pressed {
                    if !self.state.is_playing {
                        return;
                    }
                    if !self.state.is_ball_in_play {
                        // Seat the ball in the launch lane for the stroke.
                        self.table.ball.reset(&mut self.physics, self.layout.ball_start);
                    }
                    self.table.plunger.start_charge();
                } else {
                    self.release_plunger();
                }
            }
            InputAction::Start => {
                if pressed && !self.state.is_playing {
                    self.start_game();
                }
            }
        }
    }

    fn release_plunger(&mut self) {
        let Some(speed) = self.table.plunger.release() else {
            return;
        };
        self.events.emit(GameEvent::PlungerReleased { speed });

        // Launch only when no ball is live; releasing the plunger mid-play
        // must never override the live ball's motion.
        if self.state.is_playing && !self.state.is_ball_in_play {
            self.table
                .ball
                .set_velocity(&mut self.physics, Vec3::new(0.0, 1.0, -speed));
            self.state.launch_ball(&mut self.events);
        }
    }

    /// Advance the simulation by exactly one fixed timestep.
    pub fn step(&mut self) {
        if !self.state.is_playing {
            return;
        }

        self.table
            .left_flipper
            .update(PHYSICS_TIMESTEP, &mut self.physics);
        self.table
            .right_flipper
            .update(PHYSICS_TIMESTEP, &mut self.physics);
        self.table
            .plunger
            .update(PHYSICS_TIMESTEP, &mut self.physics);

        self.run_deferred();

        self.physics.step();

        let outcome =
            self.collisions
                .process_events(&mut self.physics, &mut self.state, &mut self.events);
        self.apply_outcome(outcome);

        self.ball_safety_checks();
    }

    /// Per-frame visual sync; rendering reads the transforms afterwards.
    pub fn render_sync(&mut self, dt: f32) {
        self.table.sync_transforms(&self.physics, dt);
    }

    fn schedule(&mut self, action: DeferredAction, ticks: u32) {
        // One pending instance per action kind.
        if self.deferred.iter().any(|pending| pending.action == action) {
            return;
        }
        self.deferred.push(Deferred {
            ticks_left: ticks.max(1),
            action,
        });
    }

    fn run_deferred(&mut self) {
        let mut fired = Vec::new();
        self.deferred.retain_mut(|pending| {
            pending.ticks_left -= 1;
            if pending.ticks_left == 0 {
                fired.push(pending.action);
                false
            } else {
                true
            }
        });

        for action in fired {
            match action {
                DeferredAction::RespawnBall => {
                    self.table.ball.reset(&mut self.physics, self.layout.ball_start);
                }
                DeferredAction::ResetDropTargets => {
                    for target in &mut self.table.drop_targets {
                        target.reset(&mut self.physics);
                    }
                }
            }
        }
    }

    /// Physical reactions to this step's dispatched collisions.
    fn apply_outcome(&mut self, outcome: CollisionOutcome) {
        for &index in &outcome.bumpers_hit {
            if let Some(source) = self.table.bumpers.get(index).map(|b| b.position()) {
                self.kick_away_from(source, BUMPER_IMPULSE, 0.0);
            }
        }

        for &index in &outcome.slingshots_hit {
            if let Some(source) = self.table.slingshots.get(index).map(|s| s.position()) {
                self.kick_away_from(source, SLINGSHOT_IMPULSE, 0.3);
            }
        }

        for &index in &outcome.drop_targets_hit {
            if let Some(target) = self.table.drop_targets.get_mut(index) {
                target.press(&mut self.physics);
            }
        }
        if outcome.drop_bank_completed {
            self.schedule(DeferredAction::ResetDropTargets, DROP_TARGET_RESET_TICKS);
        }

        for &index in &outcome.rollover_lanes_hit {
            if let Some(lane) = self.table.rollover_lanes.get_mut(index) {
                lane.light();
            }
        }
        if outcome.rollover_completed {
            for lane in &mut self.table.rollover_lanes {
                lane.darken();
            }
        }

        if outcome.spinner_spun {
            self.table.spinner.spin();
        }

        if !outcome.triangle_bumpers_hit.is_empty() {
            self.pocket_escape(TRIANGLE_BUMPER_BOUNCE, 1.0, 0.5, 0.5, 0.3);
        }
        if !outcome.arches_hit.is_empty() {
            self.pocket_escape(ARCH_IMPULSE, 0.5, 0.8, 0.6, 0.6);
        }
        if outcome.rocket_hit {
            let source = self.table.rocket.position();
            self.kick_away_from(source, ROCKET_BOUNCE, 0.0);
        }

        if outcome.drained {
            self.schedule_respawn();
        }
    }

    /// Impulse directed from a fixture's center through the ball, in the
    /// table plane, with an optional vertical component.
    fn kick_away_from(&mut self, source: Vec3, strength: f32, lift: f32) {
        let ball = self.table.ball.position(&self.physics);
        let away = Vec2::new(ball.x - source.x, ball.z - source.z).normalize_or_zero();
        let away = if away == Vec2::ZERO { Vec2::Y } else { away };
        self.table.ball.apply_impulse(
            &mut self.physics,
            Vec3::new(away.x * strength, lift, away.y * strength),
        );
    }

    /// Escape response for the concave props. A slow ball gets its
    /// velocity overridden toward the table center and down toward the
    /// flippers; a fast one gets a reduced nudge so the bounce still
    /// reads naturally.
    fn pocket_escape(
        &mut self,
        bounce: f32,
        slow_threshold: f32,
        slow_z_scale: f32,
        nudge_scale: f32,
        nudge_z_scale: f32,
    ) {
        let position = self.table.ball.position(&self.physics);
        let velocity = self.table.ball.velocity(&self.physics);
        let push_x = if position.x > 0.0 { -1.0 } else { 1.0 };
        let planar_speed = Vec2::new(velocity.x, velocity.z).length();

        if planar_speed < slow_threshold {
            self.table.ball.set_velocity(
                &mut self.physics,
                Vec3::new(push_x * bounce, 0.1, bounce * slow_z_scale),
            );
        } else {
            self.table.ball.apply_impulse(
                &mut self.physics,
                Vec3::new(push_x * bounce * nudge_scale, 0.0, bounce * nudge_z_scale),
            );
        }
    }

    fn schedule_respawn(&mut self) {
        if self.state.balls_remaining > 0 {
            self.schedule(DeferredAction::RespawnBall, RESPAWN_DELAY_TICKS);
        }
    }

    /// Safety and recovery checks on the ball, each independent and
    /// re-evaluated every sub-step.
    fn ball_safety_checks(&mut self) {
        let position = self.table.ball.position(&self.physics);

        // Tunneling guard: a ball that fell out of the world counts as
        // drained even though no drain sensor fired.
        if position.y < FALL_THROUGH_Y {
            if self.state.is_ball_in_play {
                self.state.drain_ball(&mut self.events);
                self.schedule_respawn();
            }
            return;
        }

        // Energy-gain guard: rescale, never redirect.
        let velocity = self.table.ball.velocity(&self.physics);
        let speed = velocity.length();
        if speed > MAX_BALL_SPEED {
            self.table
                .ball
                .set_velocity(&mut self.physics, velocity * (MAX_BALL_SPEED / speed));
        }

        // Stuck-in-pocket recovery; zones are layout configuration. Later
        // zones win where bounds overlap.
        if !self.state.is_ball_in_play {
            return;
        }
        let planar_speed = Vec2::new(velocity.x, velocity.z).length();
        let mut escape = None;
        for zone in &self.layout.trap_zones {
            if planar_speed < zone.max_planar_speed && zone.contains(position) {
                escape = Some(zone);
            }
        }
        if let Some(zone) = escape {
            log::debug!("freeing ball wedged in {}", zone.label);
            self.table
                .ball
                .set_velocity(&mut self.physics, zone.escape_velocity);
        }
    }
}
