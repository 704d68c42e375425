//! Deterministic simulation core
//!
//! The fixed-timestep pipeline: the frame scheduler drives `Simulation`
//! steps; each step advances kinematics, steps the rigid-body world,
//! dispatches tagged collision events into the scoring state machine, and
//! runs the stuck-ball recovery heuristics. External sinks subscribe to
//! the event bus.

pub mod collision;
pub mod events;
pub mod game_loop;
pub mod state;
pub mod step;

pub use collision::{ColliderTag, CollisionHandler, CollisionOutcome};
pub use events::{EventKind, GameEvent, GameEventBus, ListenerId};
pub use game_loop::GameLoop;
pub use state::GameState;
pub use step::Simulation;
