//! Scoring and progression state machine
//!
//! Score, ball count, multiplier, and the drop-target/rollover progress
//! sets, with the high score as the only durable value. Constructed once
//! per application run; `start_game` resets every per-game field.

use std::collections::HashSet;

use super::events::{GameEvent, GameEventBus};
use crate::consts::{EXTRA_BALL_THRESHOLD, INITIAL_BALLS, MAX_MULTIPLIER};
use crate::highscore::HighScoreStore;

pub struct GameState {
    pub score: u64,
    pub balls_remaining: u32,
    pub multiplier: u32,
    pub is_playing: bool,
    pub is_ball_in_play: bool,
    pub high_score: u64,
    pub drop_targets_hit: HashSet<usize>,
    pub rollover_lanes_hit: HashSet<usize>,
    next_extra_ball_at: u64,
    store: HighScoreStore,
}

impl GameState {
    /// Loads the persisted high score; a failed read yields 0.
    pub fn new(store: HighScoreStore) -> Self {
        let high_score = store.load();
        Self {
            score: 0,
            balls_remaining: INITIAL_BALLS,
            multiplier: 1,
            is_playing: false,
            is_ball_in_play: false,
            high_score,
            drop_targets_hit: HashSet::new(),
            rollover_lanes_hit: HashSet::new(),
            next_extra_ball_at: EXTRA_BALL_THRESHOLD,
            store,
        }
    }

    /// Reset every per-game field and begin playing.
    pub fn start_game(&mut self, events: &mut GameEventBus) {
        self.score = 0;
        self.balls_remaining = INITIAL_BALLS;
        self.multiplier = 1;
        self.is_playing = true;
        self.is_ball_in_play = false;
        self.drop_targets_hit.clear();
        self.rollover_lanes_hit.clear();
        self.next_extra_ball_at = EXTRA_BALL_THRESHOLD;
        events.emit(GameEvent::GameStart);
    }

    /// Mark the ball live. Callers ensure a game is running first.
    pub fn launch_ball(&mut self, events: &mut GameEventBus) {
        self.is_ball_in_play = true;
        events.emit(GameEvent::BallLaunch);
    }

    /// Add points at the current multiplier. The extra-ball threshold is
    /// checked once per call, so a single large addition grants at most
    /// one extra ball even if it crosses several thresholds.
    pub fn add_score(&mut self, events: &mut GameEventBus, points: u64) {
        let earned = points * self.multiplier as u64;
        self.score += earned;
        events.emit(GameEvent::ScoreChange {
            score: self.score,
            earned,
        });

        if self.score >= self.next_extra_ball_at {
            self.balls_remaining += 1;
            self.next_extra_ball_at += EXTRA_BALL_THRESHOLD;
            events.emit(GameEvent::ExtraBall);
        }
    }

    /// Raise the multiplier by one. Silently a no-op at the cap.
    pub fn increase_multiplier(&mut self, events: &mut GameEventBus) {
        if self.multiplier < MAX_MULTIPLIER {
            self.multiplier += 1;
            events.emit(GameEvent::MultiplierChange {
                multiplier: self.multiplier,
            });
        }
    }

    /// Take the ball out of play and spend one ball; the game ends when
    /// none remain. Draining with zero balls left stays at zero.
    pub fn drain_ball(&mut self, events: &mut GameEventBus) {
        self.is_ball_in_play = false;
        self.balls_remaining = self.balls_remaining.saturating_sub(1);
        events.emit(GameEvent::BallDrain {
            balls_remaining: self.balls_remaining,
        });

        if self.balls_remaining == 0 && self.is_playing {
            self.end_game(events);
        }
    }

    fn end_game(&mut self, events: &mut GameEventBus) {
        self.is_playing = false;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
        }
        log::info!("game over: score {}, best {}", self.score, self.high_score);
        events.emit(GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
        });
    }

    /// Record a struck drop target. Bank completion is judged and rewarded
    /// by the caller so the bonus ordering stays in one place.
    pub fn hit_drop_target(&mut self, index: usize) {
        self.drop_targets_hit.insert(index);
    }

    /// Record a crossed rollover lane; completion is the caller's concern.
    pub fn hit_rollover_lane(&mut self, index: usize) {
        self.rollover_lanes_hit.insert(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::EventKind;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn playing() -> (GameState, GameEventBus) {
        let mut state = GameState::new(HighScoreStore::new());
        let mut events = GameEventBus::new();
        state.start_game(&mut events);
        (state, events)
    }

    #[test]
    fn test_worked_scoring_example() {
        let (mut state, mut events) = playing();

        state.add_score(&mut events, 100);
        assert_eq!(state.score, 100);

        state.increase_multiplier(&mut events);
        assert_eq!(state.multiplier, 2);

        let earned = Rc::new(RefCell::new(0));
        let sink = earned.clone();
        events.on(EventKind::ScoreChange, move |event| {
            if let GameEvent::ScoreChange { earned, .. } = event {
                *sink.borrow_mut() = *earned;
            }
        });

        state.add_score(&mut events, 100);
        assert_eq!(state.score, 300);
        assert_eq!(*earned.borrow(), 200);
    }

    #[test]
    fn test_multiplier_caps_silently() {
        let (mut state, mut events) = playing();
        let changes = Rc::new(RefCell::new(0));
        let sink = changes.clone();
        events.on(EventKind::MultiplierChange, move |_| {
            *sink.borrow_mut() += 1
        });

        for _ in 0..10 {
            state.increase_multiplier(&mut events);
        }
        assert_eq!(state.multiplier, MAX_MULTIPLIER);
        assert_eq!(*changes.borrow(), (MAX_MULTIPLIER - 1) as i32);
    }

    #[test]
    fn test_huge_addition_grants_one_extra_ball() {
        let (mut state, mut events) = playing();
        let extra = Rc::new(RefCell::new(0));
        let sink = extra.clone();
        events.on(EventKind::ExtraBall, move |_| *sink.borrow_mut() += 1);

        // Crosses the first three thresholds in one addition.
        state.add_score(&mut events, 3 * EXTRA_BALL_THRESHOLD + 1);
        assert_eq!(*extra.borrow(), 1);
        assert_eq!(state.balls_remaining, INITIAL_BALLS + 1);

        // The next threshold is the second one, already passed, so any
        // further score grants another.
        state.add_score(&mut events, 1);
        assert_eq!(*extra.borrow(), 2);
    }

    #[test]
    fn test_extra_ball_at_each_threshold() {
        let (mut state, mut events) = playing();
        for _ in 0..2 {
            state.add_score(&mut events, EXTRA_BALL_THRESHOLD);
        }
        assert_eq!(state.balls_remaining, INITIAL_BALLS + 2);
    }

    #[test]
    fn test_last_drain_ends_game_with_pre_drain_score() {
        let (mut state, mut events) = playing();
        state.add_score(&mut events, 777);

        let game_overs = Rc::new(RefCell::new(Vec::new()));
        let sink = game_overs.clone();
        events.on(EventKind::GameOver, move |event| {
            if let GameEvent::GameOver { score, .. } = event {
                sink.borrow_mut().push(*score);
            }
        });

        for _ in 0..INITIAL_BALLS {
            state.launch_ball(&mut events);
            state.drain_ball(&mut events);
        }
        assert!(!state.is_playing);
        assert_eq!(*game_overs.borrow(), vec![777]);

        // Draining again after the game ended is a clamped no-op.
        state.drain_ball(&mut events);
        assert_eq!(state.balls_remaining, 0);
        assert_eq!(game_overs.borrow().len(), 1);
    }

    #[test]
    fn test_game_over_updates_high_score() {
        let (mut state, mut events) = playing();
        state.add_score(&mut events, 5_000);
        for _ in 0..INITIAL_BALLS {
            state.drain_ball(&mut events);
        }
        assert_eq!(state.high_score, 5_000);

        // A worse run leaves the best alone.
        state.start_game(&mut events);
        state.add_score(&mut events, 100);
        for _ in 0..INITIAL_BALLS {
            state.drain_ball(&mut events);
        }
        assert_eq!(state.high_score, 5_000);
    }

    #[test]
    fn test_start_game_resets_everything() {
        let (mut state, mut events) = playing();
        state.add_score(&mut events, 60_000);
        state.increase_multiplier(&mut events);
        state.hit_drop_target(0);
        state.hit_rollover_lane(1);
        for _ in 0..INITIAL_BALLS + 1 {
            state.drain_ball(&mut events);
        }
        assert!(!state.is_playing);

        state.start_game(&mut events);
        assert_eq!(state.score, 0);
        assert_eq!(state.balls_remaining, INITIAL_BALLS);
        assert_eq!(state.multiplier, 1);
        assert!(state.is_playing);
        assert!(!state.is_ball_in_play);
        assert!(state.drop_targets_hit.is_empty());
        assert!(state.rollover_lanes_hit.is_empty());

        // The threshold was reset too: 50k from zero grants a ball again.
        state.add_score(&mut events, EXTRA_BALL_THRESHOLD);
        assert_eq!(state.balls_remaining, INITIAL_BALLS + 1);
    }

    #[test]
    fn test_progress_sets_are_membership_only() {
        let (mut state, _events) = playing();
        state.hit_drop_target(3);
        state.hit_drop_target(3);
        assert_eq!(state.drop_targets_hit.len(), 1);
        state.hit_rollover_lane(0);
        state.hit_rollover_lane(2);
        assert_eq!(state.rollover_lanes_hit.len(), 2);
    }

    proptest! {
        /// Final score equals the sum of points times the multiplier in
        /// effect at each call; multiplier changes only affect later calls.
        #[test]
        fn prop_score_uses_multiplier_at_call_time(
            calls in prop::collection::vec((0u64..10_000, any::<bool>()), 1..40)
        ) {
            let (mut state, mut events) = playing();
            let mut expected = 0u64;
            let mut shadow_multiplier = 1u64;

            for (points, bump_first) in calls {
                if bump_first {
                    state.increase_multiplier(&mut events);
                    shadow_multiplier = (shadow_multiplier + 1).min(MAX_MULTIPLIER as u64);
                }
                state.add_score(&mut events, points);
                expected += points * shadow_multiplier;
            }

            prop_assert_eq!(state.score, expected);
        }
    }
}
