//! Collision tagging and dispatch
//!
//! Maps opaque collider handles to semantic roles, then turns the physics
//! engine's raw collision-start notifications into scoring, progression,
//! and gameplay events. Exactly one dispatch per contact onset: only
//! "started" notifications are consumed, so a ball resting in continuous
//! contact cannot re-trigger.

use std::collections::HashMap;

use rapier3d::prelude::{ColliderHandle, CollisionEvent};

use super::events::{GameEvent, GameEventBus};
use super::state::GameState;
use crate::consts::{
    BUMPER_SCORE, DROP_TARGET_BANK_BONUS, DROP_TARGET_BANK_SIZE, DROP_TARGET_SCORE, RAMP_SCORE,
    ROLLOVER_COMPLETE_BONUS, ROLLOVER_LANE_COUNT, ROLLOVER_SCORE, SLINGSHOT_SCORE, SPINNER_SCORE,
};
use crate::physics::PhysicsWorld;

/// Semantic role of a collider on the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderTag {
    Ball,
    Bumper,
    Slingshot,
    DropTarget,
    Spinner,
    RolloverLane,
    Ramp,
    Drain,
    Flipper,
    Wall,
    Plunger,
    TriangleBumper,
    Rocket,
    Arch,
}

#[derive(Debug, Clone, Copy)]
struct TagEntry {
    tag: ColliderTag,
    index: usize,
}

/// Physical follow-ups collected while dispatching one step's collisions.
/// The simulation consumes this after dispatch: kick impulses, target
/// sinking, lamp latching, and deferred resets all happen there, keeping
/// this module free of physics mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    pub bumpers_hit: Vec<usize>,
    pub slingshots_hit: Vec<usize>,
    pub drop_targets_hit: Vec<usize>,
    pub drop_bank_completed: bool,
    pub rollover_lanes_hit: Vec<usize>,
    pub rollover_completed: bool,
    pub spinner_spun: bool,
    pub triangle_bumpers_hit: Vec<usize>,
    pub arches_hit: Vec<usize>,
    pub rocket_hit: bool,
    pub drained: bool,
}

/// Registry of collider roles plus the per-step dispatcher.
///
/// Built once during table assembly; queried read-only during simulation.
/// Handles must be re-registered if their entity is rebuilt, since the
/// physics engine reuses handles after deallocation.
#[derive(Default)]
pub struct CollisionHandler {
    tags: HashMap<ColliderHandle, TagEntry>,
    ball: Option<ColliderHandle>,
}

impl CollisionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a collider with a role. Idempotent; the last write wins.
    pub fn register_collider(&mut self, handle: ColliderHandle, tag: ColliderTag, index: usize) {
        self.tags.insert(handle, TagEntry { tag, index });
    }

    /// Tag the session's single ball collider.
    pub fn register_ball(&mut self, handle: ColliderHandle) {
        self.ball = Some(handle);
        self.tags.insert(
            handle,
            TagEntry {
                tag: ColliderTag::Ball,
                index: 0,
            },
        );
    }

    /// The session's ball collider, once registered.
    pub fn ball_handle(&self) -> Option<ColliderHandle> {
        self.ball
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Forget every registration, e.g. on table teardown.
    pub fn clear(&mut self) {
        self.tags.clear();
        self.ball = None;
    }

    /// Drain every collision notification produced by the last physics
    /// step and dispatch the ball-initiated onsets.
    pub fn process_events(
        &self,
        physics: &mut PhysicsWorld,
        state: &mut GameState,
        events: &mut GameEventBus,
    ) -> CollisionOutcome {
        let queue = std::iter::from_fn(|| physics.poll_collision_event());
        self.process_queue(queue, state, events)
    }

    /// Channel-free core of [`process_events`].
    ///
    /// [`process_events`]: Self::process_events
    pub fn process_queue(
        &self,
        queue: impl Iterator<Item = CollisionEvent>,
        state: &mut GameState,
        events: &mut GameEventBus,
    ) -> CollisionOutcome {
        let mut outcome = CollisionOutcome::default();
        for event in queue {
            // Only the contact onset matters for scoring.
            if let CollisionEvent::Started(h1, h2, _) = event {
                self.dispatch(h1, h2, state, events, &mut outcome);
            }
        }
        outcome
    }

    fn dispatch(
        &self,
        h1: ColliderHandle,
        h2: ColliderHandle,
        state: &mut GameState,
        events: &mut GameEventBus,
        outcome: &mut CollisionOutcome,
    ) {
        // Untracked colliders are the expected steady state for non-scoring
        // contacts (ball against playfield, etc.); skip without comment.
        let (Some(e1), Some(e2)) = (self.tags.get(&h1), self.tags.get(&h2)) else {
            return;
        };

        // Only ball-initiated contacts score.
        let other = if e1.tag == ColliderTag::Ball {
            e2
        } else if e2.tag == ColliderTag::Ball {
            e1
        } else {
            return;
        };

        self.handle_ball_contact(*other, state, events, outcome);
    }

    fn handle_ball_contact(
        &self,
        other: TagEntry,
        state: &mut GameState,
        events: &mut GameEventBus,
        outcome: &mut CollisionOutcome,
    ) {
        match other.tag {
            ColliderTag::Bumper => {
                state.add_score(events, BUMPER_SCORE);
                events.emit(GameEvent::BumperHit { index: other.index });
                outcome.bumpers_hit.push(other.index);
            }
            ColliderTag::Slingshot => {
                state.add_score(events, SLINGSHOT_SCORE);
                events.emit(GameEvent::SlingshotHit { index: other.index });
                outcome.slingshots_hit.push(other.index);
            }
            ColliderTag::DropTarget => {
                state.add_score(events, DROP_TARGET_SCORE);
                state.hit_drop_target(other.index);
                events.emit(GameEvent::DropTargetHit { index: other.index });
                outcome.drop_targets_hit.push(other.index);

                if state.drop_targets_hit.len() >= DROP_TARGET_BANK_SIZE {
                    // The bank bonus is earned at the freshly raised
                    // multiplier; the per-target score above used the old
                    // one.
                    state.increase_multiplier(events);
                    state.add_score(events, DROP_TARGET_BANK_BONUS);
                    state.drop_targets_hit.clear();
                    events.emit(GameEvent::DropTargetBankComplete);
                    outcome.drop_bank_completed = true;
                }
            }
            ColliderTag::Spinner => {
                state.add_score(events, SPINNER_SCORE);
                events.emit(GameEvent::SpinnerSpin);
                outcome.spinner_spun = true;
            }
            ColliderTag::RolloverLane => {
                state.add_score(events, ROLLOVER_SCORE);
                state.hit_rollover_lane(other.index);
                events.emit(GameEvent::RolloverLane { index: other.index });
                outcome.rollover_lanes_hit.push(other.index);

                if state.rollover_lanes_hit.len() >= ROLLOVER_LANE_COUNT {
                    // No multiplier increase for the lane bank.
                    state.add_score(events, ROLLOVER_COMPLETE_BONUS);
                    state.rollover_lanes_hit.clear();
                    events.emit(GameEvent::RolloverComplete);
                    outcome.rollover_completed = true;
                }
            }
            ColliderTag::Ramp => {
                state.add_score(events, RAMP_SCORE);
                events.emit(GameEvent::RampComplete);
            }
            ColliderTag::Drain => {
                // A drain crossing with no ball in play (e.g. right after a
                // fall-through was already handled) is benign.
                if state.is_ball_in_play {
                    state.drain_ball(events);
                    outcome.drained = true;
                }
            }
            ColliderTag::TriangleBumper => {
                events.emit(GameEvent::TriangleBumperHit { index: other.index });
                outcome.triangle_bumpers_hit.push(other.index);
            }
            ColliderTag::Rocket => {
                events.emit(GameEvent::RocketHit);
                outcome.rocket_hit = true;
            }
            ColliderTag::Arch => {
                events.emit(GameEvent::ArchHit { index: other.index });
                outcome.arches_hit.push(other.index);
            }
            // Plain bounces; the physics engine already handled them.
            ColliderTag::Ball | ColliderTag::Flipper | ColliderTag::Wall | ColliderTag::Plunger => {
            }
        }
    }
}
