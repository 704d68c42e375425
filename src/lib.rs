//! Astro Pinball - a tilted-table 3D pinball simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation core (fixed-timestep loop, collision
//!   dispatch, scoring state machine, event bus)
//! - `physics`: Rigid-body world wrapper around rapier3d
//! - `table`: Declarative table layout and assembly
//! - `entities`: Playfield entities (ball, flippers, plunger, fixtures)
//! - `highscore`: Persisted high score
//! - `input`: Abstract input actions
//!
//! Rendering, audio, and UI live outside this crate: they read entity
//! transforms and subscribe to the gameplay event bus.

pub mod entities;
pub mod highscore;
pub mod input;
pub mod physics;
pub mod sim;
pub mod table;

pub use highscore::HighScoreStore;
pub use input::{InputAction, InputState};
pub use sim::{GameEvent, GameEventBus, GameLoop, GameState, Simulation};

/// Game configuration constants
pub mod consts {
    // ---- Table dimensions ----
    pub const TABLE_WIDTH: f32 = 5.0;
    pub const TABLE_LENGTH: f32 = 10.0;
    /// Cabinet pitch; determines the tilted gravity vector.
    pub const TABLE_TILT_DEGREES: f32 = 6.5;

    // ---- Ball ----
    pub const BALL_RADIUS: f32 = 0.13;
    pub const BALL_MASS: f32 = 0.08;
    pub const BALL_RESTITUTION: f32 = 0.4;
    pub const BALL_FRICTION: f32 = 0.2;
    pub const BALL_LINEAR_DAMPING: f32 = 0.3;
    pub const BALL_ANGULAR_DAMPING: f32 = 0.1;

    // ---- Flippers ----
    pub const FLIPPER_LENGTH: f32 = 0.8;
    pub const FLIPPER_WIDTH: f32 = 0.15;
    pub const FLIPPER_HEIGHT: f32 = 0.15;
    /// Resting angle relative to the pivot (radians); mirrored for the
    /// right flipper.
    pub const FLIPPER_REST_ANGLE: f32 = -0.45;
    pub const FLIPPER_MAX_ANGLE: f32 = 0.45;
    /// Angular speed while swinging (radians per second).
    pub const FLIPPER_SPEED: f32 = 25.0;
    pub const FLIPPER_Y: f32 = 0.1;

    // ---- Plunger ----
    /// Maximum pull-back distance (meters).
    pub const PLUNGER_MAX_PULL: f32 = 0.8;
    /// Pull-back accumulation rate while held (meters per second).
    pub const PLUNGER_CHARGE_SPEED: f32 = 2.5;
    /// Ball launch speed at full charge (meters per second, up the lane).
    pub const PLUNGER_LAUNCH_SPEED: f32 = 18.0;
    pub const PLUNGER_WIDTH: f32 = 0.2;
    pub const PLUNGER_HEIGHT: f32 = 0.5;

    // ---- Bumpers ----
    pub const BUMPER_RADIUS: f32 = 0.25;
    pub const BUMPER_HEIGHT: f32 = 0.3;
    pub const BUMPER_IMPULSE: f32 = 5.0;
    pub const BUMPER_SCORE: u64 = 100;

    // ---- Slingshots ----
    pub const SLINGSHOT_IMPULSE: f32 = 3.0;
    pub const SLINGSHOT_SCORE: u64 = 10;

    // ---- Drop targets ----
    pub const DROP_TARGET_WIDTH: f32 = 0.3;
    pub const DROP_TARGET_HEIGHT: f32 = 0.25;
    pub const DROP_TARGET_DEPTH: f32 = 0.08;
    pub const DROP_TARGET_SCORE: u64 = 500;
    pub const DROP_TARGET_BANK_BONUS: u64 = 10_000;
    pub const DROP_TARGET_BANK_SIZE: usize = 5;

    // ---- Spinner ----
    pub const SPINNER_SCORE: u64 = 10;

    // ---- Rollover lanes ----
    pub const ROLLOVER_SCORE: u64 = 200;
    pub const ROLLOVER_COMPLETE_BONUS: u64 = 5_000;
    pub const ROLLOVER_LANE_COUNT: usize = 3;

    // ---- Ramp ----
    pub const RAMP_SCORE: u64 = 2_000;

    // ---- Decorative props ----
    pub const TRIANGLE_BUMPER_BOUNCE: f32 = 1.2;
    pub const ROCKET_BOUNCE: f32 = 1.5;
    pub const ARCH_IMPULSE: f32 = 1.5;

    // ---- Scoring ----
    pub const INITIAL_BALLS: u32 = 3;
    pub const MAX_MULTIPLIER: u32 = 5;
    /// An extra ball is granted each time the score crosses the next
    /// multiple of this threshold.
    pub const EXTRA_BALL_THRESHOLD: u64 = 50_000;

    // ---- Timing ----
    /// Fixed simulation timestep (120 Hz).
    pub const PHYSICS_TIMESTEP: f32 = 1.0 / 120.0;
    /// Per-tick wall-clock clamp; bounds catch-up after a stall.
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Delay before a drained ball is reseated in the launch lane.
    pub const RESPAWN_DELAY_TICKS: u32 = 120;
    /// Delay before a completed drop-target bank pops back up.
    pub const DROP_TARGET_RESET_TICKS: u32 = 120;

    // ---- Ball safety ----
    /// Speed cap; repeated bounces must not fling the ball off the table.
    pub const MAX_BALL_SPEED: f32 = 15.0;
    /// Height below which the ball is considered to have tunneled out.
    pub const FALL_THROUGH_Y: f32 = -5.0;

    // ---- Launch lane ----
    pub const LAUNCH_LANE_X: f32 = TABLE_WIDTH / 2.0 - 0.35;
    pub const LAUNCH_LANE_WIDTH: f32 = 0.5;
}
